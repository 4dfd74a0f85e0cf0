//! Camera-relative intent resolution and base locomotion speed.

use glam::{Vec2, Vec3};

use crate::config::LocomotionConfig;

/// World-space camera axes. Need not be horizontal; only their ground-plane
/// projections are used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

pub struct InputResolver {
    config: LocomotionConfig,
}

impl InputResolver {
    pub fn new(config: LocomotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Map 2D stick intent to a unit world direction on the ground plane.
    ///
    /// Returns `Vec3::ZERO` (the "no intent" sentinel) inside the deadzone,
    /// without a camera, or when the camera looks straight up or down.
    pub fn resolve(&self, raw: Vec2, camera: Option<&CameraBasis>) -> Vec3 {
        if raw.length() < self.config.deadzone {
            return Vec3::ZERO;
        }
        let Some(camera) = camera else {
            return Vec3::ZERO;
        };
        let forward = flatten(camera.forward);
        let right = flatten(camera.right);
        (right * raw.x + forward * raw.y).normalize_or_zero()
    }

    /// Sprint only applies on the ground.
    pub fn target_speed(&self, grounded: bool, sprint_held: bool) -> f32 {
        if grounded && sprint_held {
            self.config.sprint_speed
        } else {
            self.config.move_speed
        }
    }

    /// Horizontal velocity for an unlocked tick. On the ground intent is
    /// applied directly; in the air it steers toward walk speed at
    /// `air_control` m/s² when configured.
    pub fn horizontal_velocity(
        &self,
        current: Vec3,
        direction: Vec3,
        grounded: bool,
        sprint_held: bool,
        dt: f32,
    ) -> Vec3 {
        if grounded {
            direction * self.target_speed(true, sprint_held)
        } else {
            self.air_velocity(current, direction, dt)
        }
    }

    /// Airborne steering toward walk speed, bounded by `air_control * dt`.
    pub fn air_velocity(&self, current: Vec3, direction: Vec3, dt: f32) -> Vec3 {
        let target = direction * self.config.move_speed;
        match self.config.air_control {
            Some(accel) => move_towards(current, target, accel * dt.max(0.0)),
            None => target,
        }
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Step `current` toward `target` by at most `max_delta`, without overshoot.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist < 1e-6 {
        target
    } else {
        current + diff / dist * max_delta
    }
}
