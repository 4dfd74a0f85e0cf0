use glam::Vec3;

/// Static collision shape attached to a world entity.
///
/// Box orientation is ignored (axis-aligned); planes are infinite.
#[derive(Debug, Clone, Copy)]
pub enum Collider {
    Plane { normal: Vec3, offset: f32 },
    Box { half_extents: Vec3 },
}

/// Marker: entity is immovable level geometry the character collides with.
pub struct Static;

/// Upright capsule used by the character's kinematic body.
///
/// `height` is the full extent including both caps (so the capsule's lowest
/// point sits `height / 2` below its center).
#[derive(Debug, Clone, Copy)]
pub struct CharacterCollider {
    pub radius: f32,
    pub height: f32,
    /// Result of the last move: a walkable surface was touched below.
    pub grounded: bool,
    /// `false` while an ability drives the transform directly.
    pub enabled: bool,
}

impl CharacterCollider {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height: height.max(radius * 2.0),
            grounded: false,
            enabled: true,
        }
    }

    /// Distance from the capsule center to each cap-sphere center.
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    /// Endpoints (bottom, top) of the core segment for a capsule at `center`.
    pub fn segment(&self, center: Vec3) -> (Vec3, Vec3) {
        let h = self.half_segment();
        (center - Vec3::Y * h, center + Vec3::Y * h)
    }
}
