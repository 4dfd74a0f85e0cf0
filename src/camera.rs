use glam::Vec3;

use crate::locomotion::CameraBasis;

/// Orbit-free yaw/pitch camera. Only its orientation matters to the
/// character: movement intent is resolved against [`Camera::basis`].
pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    /// Looking along +Z, slightly down.
    pub fn new() -> Self {
        Self {
            yaw: 90.0_f32,
            pitch: -20.0,
        }
    }

    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-89.0, 89.0);
    }

    pub fn front(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalize()
    }

    pub fn basis(&self) -> CameraBasis {
        let forward = self.front();
        CameraBasis {
            forward,
            right: forward.cross(Vec3::Y).normalize_or_zero(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
