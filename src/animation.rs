//! Interface to the animation collaborator: fire-and-forget cues out,
//! continuous parameters out, clip-finished callbacks in.

/// One-shot triggers sent when an ability starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    Jump,
    DoubleJump,
    Dash,
    GroundPound,
    LedgeClimb,
}

impl AnimationCue {
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump        => "Jump",
            Self::DoubleJump  => "DoubleJump",
            Self::Dash        => "Dash",
            Self::GroundPound => "GroundPound",
            Self::LedgeClimb  => "LedgeClimb",
        }
    }
}

/// Continuous parameters pushed once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatorParams {
    /// Planar speed (X/Z only).
    pub speed: f32,
    pub grounded: bool,
    pub jumping: bool,
    pub falling: bool,
}

/// Notifications coming back from the animator: clip ends the core waits on
/// to release locks, and foot contacts from the locomotion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCallback {
    EndGroundPound,
    EndLedgeClimb,
    Footstep,
}

pub trait AnimationSink {
    fn trigger(&mut self, cue: AnimationCue);
    fn set_parameters(&mut self, params: AnimatorParams);
}
