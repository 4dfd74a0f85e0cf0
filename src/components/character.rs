use glam::Vec3;

// ---------------------------------------------------------------------------
// Player state machine
// ---------------------------------------------------------------------------

/// All discrete states the character can be in.
///
/// Grounded states (`Idle`, `Moving`, `Sprinting`) and airborne states
/// (`Jumping`, `Falling`) are derived by the motor from physical facts every
/// tick. The three locking states are entered and left only through
/// `Motor::set_state` by the ability that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Idle,
    Moving,
    Sprinting,
    Jumping,
    Falling,
    Dashing,
    GroundPounding,
    LedgeClimbing,
}

impl PlayerState {
    /// While locked, base locomotion and ability triggers are suspended and
    /// only the owning ability writes velocity or requests the next state.
    pub fn is_locking(self) -> bool {
        matches!(self, Self::Dashing | Self::GroundPounding | Self::LedgeClimbing)
    }

    pub fn is_grounded_state(self) -> bool {
        matches!(self, Self::Idle | Self::Moving | Self::Sprinting)
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle           => "Idle",
            Self::Moving         => "Moving",
            Self::Sprinting      => "Sprinting",
            Self::Jumping        => "Jumping",
            Self::Falling        => "Falling",
            Self::Dashing        => "Dashing",
            Self::GroundPounding => "GroundPounding",
            Self::LedgeClimbing  => "LedgeClimbing",
        }
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker: this entity is the player.
pub struct Player;

// ---------------------------------------------------------------------------
// Ledge markers
// ---------------------------------------------------------------------------

/// A grabbable ledge. Orientation comes from the entity's `LocalTransform`:
/// local +X runs along the ledge, local +Z points over the top (the direction
/// the character faces after climbing).
#[derive(Debug, Clone, Copy)]
pub struct LedgeMarker {
    /// Half the usable length along local +X.
    pub half_width: f32,
    /// Stand-up offset from the grab point, in the ledge's local frame.
    pub climb_up_offset: Vec3,
    /// Half extents of the overlap volume, in the ledge's local frame.
    pub trigger_half_extents: Vec3,
}

impl LedgeMarker {
    pub fn new(half_width: f32) -> Self {
        Self {
            half_width,
            climb_up_offset: Vec3::new(0.0, 1.2, 0.8),
            // Deep enough over the lip that the stand-up pose is still inside;
            // leaving and re-entering would read as a fresh grab.
            trigger_half_extents: Vec3::new(half_width, 0.4, 0.5),
        }
    }
}
