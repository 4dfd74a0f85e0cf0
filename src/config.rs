//! Tuning values for the motor and every ability, loadable from RON.
//!
//! Every section defaults field-by-field, so a file only lists what it
//! overrides:
//!
//! ```ron
//! (
//!     motor: (gravity: -25.0),
//!     dash: (dash_cooldown: 0.5),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub motor: MotorConfig,
    pub locomotion: LocomotionConfig,
    pub jump: JumpConfig,
    pub dash: DashConfig,
    pub ground_pound: GroundPoundConfig,
    pub ledge_climb: LedgeClimbConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Signed acceleration along Y (negative = down), m/s².
    pub gravity: f32,
    /// Vertical velocity held while standing, so the body keeps touching
    /// the floor on slopes instead of bouncing.
    pub grounded_gravity: f32,
    /// Facing slerp rate, per second.
    pub rotation_smoothing: f32,
    /// Planar speed above which a grounded character counts as moving.
    pub move_threshold: f32,
    /// Planar speed above which a grounded character counts as sprinting.
    pub sprint_threshold: f32,
    /// Vertical velocity after bumping a ceiling while rising.
    pub ceiling_bounce: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            grounded_gravity: -2.0,
            rotation_smoothing: 15.0,
            move_threshold: 0.1,
            sprint_threshold: 5.1,
            ceiling_bounce: -1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub move_speed: f32,
    pub sprint_speed: f32,
    /// Stick magnitude below which intent reads as zero.
    pub deadzone: f32,
    /// Airborne steering acceleration (m/s²). `None` = airborne velocity is
    /// written directly from intent, like on the ground.
    pub air_control: Option<f32>,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            sprint_speed: 8.0,
            deadzone: 0.1,
            air_control: Some(2.5),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Apex height of a jump from rest, meters.
    pub jump_height: f32,
    /// Horizontal velocity is scaled by this on takeoff.
    pub air_momentum_multiplier: f32,
    pub can_double_jump: bool,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_height: 2.0,
            air_momentum_multiplier: 0.8,
            can_double_jump: true,
        }
    }
}

impl JumpConfig {
    /// Launch speed that reaches `jump_height` under `gravity`:
    /// v = sqrt(h * -2g). Zero when gravity does not pull down.
    pub fn launch_speed(&self, gravity: f32) -> f32 {
        (self.jump_height * -2.0 * gravity).max(0.0).sqrt()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub can_dash: bool,
    /// Horizontal speed during the dash, m/s.
    pub dash_power: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            can_dash: true,
            dash_power: 20.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroundPoundConfig {
    pub can_ground_pound: bool,
    /// Vertical velocity applied on trigger (negative = down).
    pub ground_pound_force: f32,
}

impl Default for GroundPoundConfig {
    fn default() -> Self {
        Self {
            can_ground_pound: true,
            ground_pound_force: -30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgeClimbConfig {
    pub ledge_climb_duration: f32,
}

impl Default for LedgeClimbConfig {
    fn default() -> Self {
        Self {
            ledge_climb_duration: 1.0,
        }
    }
}

impl TuningConfig {
    /// Load and sanitize a tuning file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_ron::<Self>(path).map(Self::sanitized)
    }

    /// Parse and sanitize tuning from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        parse_ron::<Self>(text, "<inline>").map(Self::sanitized)
    }

    /// Clamp values that would invert timer or availability logic. Each
    /// correction is logged; nothing is rejected.
    pub fn sanitized(mut self) -> Self {
        clamp_non_negative("locomotion.move_speed", &mut self.locomotion.move_speed);
        clamp_non_negative("locomotion.sprint_speed", &mut self.locomotion.sprint_speed);
        clamp_non_negative("locomotion.deadzone", &mut self.locomotion.deadzone);
        if let Some(air) = self.locomotion.air_control.as_mut() {
            clamp_non_negative("locomotion.air_control", air);
        }
        clamp_non_negative("motor.rotation_smoothing", &mut self.motor.rotation_smoothing);
        clamp_non_negative("jump.jump_height", &mut self.jump.jump_height);
        clamp_non_negative("dash.dash_duration", &mut self.dash.dash_duration);
        clamp_non_negative("dash.dash_cooldown", &mut self.dash.dash_cooldown);
        clamp_non_negative(
            "ledge_climb.ledge_climb_duration",
            &mut self.ledge_climb.ledge_climb_duration,
        );
        if self.motor.gravity >= 0.0 {
            warn!(gravity = self.motor.gravity, "gravity does not pull down; jumps will have no launch speed");
        }
        self
    }
}

fn clamp_non_negative(field: &str, value: &mut f32) {
    if *value < 0.0 || value.is_nan() {
        warn!(field, value = *value, "negative tuning value clamped to 0");
        *value = 0.0;
    }
}

/// Read and deserialize a RON file.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: origin.clone(),
        source,
    })?;
    parse_ron(&text, &origin)
}

pub(crate) fn parse_ron<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, ConfigError> {
    ron::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_launch_speed_matches_projectile_formula() {
        let jump = JumpConfig::default();
        let v = jump.launch_speed(-20.0);
        assert!((v - 80.0_f32.sqrt()).abs() < 1e-5);
        assert_eq!(jump.launch_speed(5.0), 0.0);
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg = TuningConfig::from_ron_str("(motor: (gravity: -25.0), dash: (dash_cooldown: 0.5))")
            .unwrap();
        assert_eq!(cfg.motor.gravity, -25.0);
        assert_eq!(cfg.motor.grounded_gravity, -2.0);
        assert_eq!(cfg.dash.dash_cooldown, 0.5);
        assert_eq!(cfg.dash.dash_power, 20.0);
        assert_eq!(cfg.jump.jump_height, 2.0);
    }

    #[test]
    fn negative_durations_are_clamped() {
        let cfg = TuningConfig::from_ron_str(
            "(dash: (dash_duration: -1.0, dash_cooldown: -0.2), ledge_climb: (ledge_climb_duration: -3.0))",
        )
        .unwrap();
        assert_eq!(cfg.dash.dash_duration, 0.0);
        assert_eq!(cfg.dash.dash_cooldown, 0.0);
        assert_eq!(cfg.ledge_climb.ledge_climb_duration, 0.0);
    }

    #[test]
    fn air_control_can_be_disabled() {
        let cfg = TuningConfig::from_ron_str("(locomotion: (air_control: None))").unwrap();
        assert_eq!(cfg.locomotion.air_control, None);
    }

    #[test]
    fn malformed_ron_reports_parse_error() {
        let err = TuningConfig::from_ron_str("(motor: (gravity: \"down\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = TuningConfig::load(Path::new("/nonexistent/hopper/tuning.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
