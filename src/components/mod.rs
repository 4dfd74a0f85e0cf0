mod character;
mod physics;

pub use character::*;
pub use physics::*;

use glam::{Quat, Vec3};

/// Spatial transform with position and rotation (world space; the scene has
/// no hierarchy).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Position + facing pair used as interpolation endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Lerp position and slerp rotation. `t` is clamped to `0..=1`; both ends
    /// return the endpoint itself rather than a recomputed value.
    pub fn interpolate(&self, to: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *to;
        }
        Pose {
            position: self.position.lerp(to.position, t),
            rotation: self.rotation.slerp(to.rotation, t),
        }
    }
}

impl From<LocalTransform> for Pose {
    fn from(t: LocalTransform) -> Self {
        Self::new(t.position, t.rotation)
    }
}

/// Yaw-only rotation whose forward (+Z) points along `direction` projected
/// onto the ground plane. `None` when the projection is degenerate.
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < 1e-8 {
        return None;
    }
    Some(Quat::from_rotation_y(flat.x.atan2(flat.z)))
}
