use glam::Vec3;
use tracing::debug;

use crate::animation::AnimationCue;
use crate::components::PlayerState;
use crate::config::DashConfig;
use crate::events::MotorEvent;
use crate::motor::Motor;

use super::timed::{count_down, Progress, Timed};

/// Vertical velocity to hand back when the dash ends.
#[derive(Debug, Clone, Copy)]
struct DashPayload {
    restore_vertical: f32,
}

/// Timed horizontal burst. Holds the `Dashing` lock for `dash_duration`,
/// suspending gravity and steering; the cooldown runs independently.
pub struct DashAbility {
    config: DashConfig,
    cooldown_remaining: f32,
    active: Option<Timed<DashPayload>>,
}

impl DashAbility {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            cooldown_remaining: 0.0,
            active: None,
        }
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn is_ready(&self) -> bool {
        self.config.can_dash && self.cooldown_remaining <= 0.0
    }

    pub fn is_dashing(&self) -> bool {
        self.active.is_some()
    }

    /// Start a dash along `direction`, or along the current facing when
    /// `direction` is the zero sentinel.
    pub fn try_dash(&mut self, motor: &mut Motor, direction: Vec3) -> bool {
        if !self.is_ready() || motor.is_locked() {
            return false;
        }

        let direction = if direction == Vec3::ZERO {
            motor.forward()
        } else {
            direction
        };

        motor.emit(MotorEvent::Dash);
        motor.set_state(PlayerState::Dashing);
        motor.cue(AnimationCue::Dash);
        self.cooldown_remaining = self.config.dash_cooldown;

        let payload = DashPayload {
            restore_vertical: motor.vertical_velocity(),
        };
        motor.set_vertical_velocity(0.0);
        motor.set_horizontal_velocity(direction * self.config.dash_power);
        self.active = Some(Timed::new(self.config.dash_duration, payload));
        true
    }

    /// Every tick, locked or not: count the cooldown down and advance an
    /// active dash, releasing the lock when it runs out.
    pub fn tick(&mut self, motor: &mut Motor, dt: f32) {
        self.cooldown_remaining = count_down(self.cooldown_remaining, dt);

        let finished = match self.active.as_mut() {
            Some(dash) => dash.advance(dt) == Progress::Finished,
            None => false,
        };
        if !finished {
            return;
        }
        let Some(dash) = self.active.take() else {
            return;
        };
        if motor.state() != PlayerState::Dashing {
            // Lock was taken away mid-dash (interrupt); nothing to hand back.
            return;
        }
        let payload = dash.into_payload();
        motor.set_vertical_velocity(payload.restore_vertical);
        motor.set_horizontal_velocity(Vec3::ZERO);
        motor.set_state(PlayerState::Falling);
        debug!(restore_vertical = payload.restore_vertical, "dash finished");
    }

    /// Drop an active dash without restoring anything. The cooldown keeps
    /// running.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{GroundPoundAbility, JumpAbility};
    use crate::config::{GroundPoundConfig, JumpConfig, MotorConfig};
    use glam::Quat;

    fn setup() -> (Motor, DashAbility) {
        (
            Motor::new(MotorConfig::default()),
            DashAbility::new(DashConfig::default()),
        )
    }

    #[test]
    fn dash_takes_lock_and_overrides_velocity() {
        let (mut motor, mut dash) = setup();
        motor.set_vertical_velocity(-4.0);
        assert!(dash.try_dash(&mut motor, Vec3::X));

        assert_eq!(motor.state(), PlayerState::Dashing);
        assert!(motor.is_locked());
        assert_eq!(motor.vertical_velocity(), 0.0);
        assert_eq!(motor.horizontal_velocity(), Vec3::new(20.0, 0.0, 0.0));
        assert_eq!(dash.cooldown_remaining(), 1.0);
        assert_eq!(motor.take_cues(), vec![AnimationCue::Dash]);
        let events = motor.take_events();
        assert_eq!(events[0], MotorEvent::Dash);
    }

    #[test]
    fn zero_direction_falls_back_to_facing() {
        let (mut motor, mut dash) = setup();
        motor.set_facing(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        dash.try_dash(&mut motor, Vec3::ZERO);
        let v = motor.horizontal_velocity();
        assert!((v - Vec3::new(20.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn dash_ends_restoring_vertical_and_falling() {
        let (mut motor, mut dash) = setup();
        motor.set_vertical_velocity(-4.0);
        dash.try_dash(&mut motor, Vec3::Z);

        dash.tick(&mut motor, 0.1);
        assert_eq!(motor.state(), PlayerState::Dashing);
        assert!(dash.is_dashing());

        dash.tick(&mut motor, 0.1);
        assert_eq!(motor.state(), PlayerState::Falling);
        assert!(!dash.is_dashing());
        assert_eq!(motor.vertical_velocity(), -4.0);
        assert_eq!(motor.horizontal_velocity(), Vec3::ZERO);
    }

    #[test]
    fn cooldown_rejects_early_and_accepts_on_time() {
        let (mut motor, mut dash) = setup();
        assert!(dash.try_dash(&mut motor, Vec3::X));

        dash.tick(&mut motor, 0.25);
        dash.tick(&mut motor, 0.25);
        assert!(!motor.is_locked());
        assert!(!dash.try_dash(&mut motor, Vec3::X));

        dash.tick(&mut motor, 0.25);
        dash.tick(&mut motor, 0.25);
        assert!(dash.try_dash(&mut motor, Vec3::X));
    }

    #[test]
    fn cooldown_runs_while_locked() {
        let (mut motor, mut dash) = setup();
        dash.try_dash(&mut motor, Vec3::X);
        motor.set_state(PlayerState::GroundPounding);
        for _ in 0..4 {
            dash.tick(&mut motor, 0.25);
        }
        assert_eq!(dash.cooldown_remaining(), 0.0);
        assert_eq!(motor.state(), PlayerState::GroundPounding);
    }

    #[test]
    fn dash_lock_excludes_jump_and_ground_pound() {
        let (mut motor, mut dash) = setup();
        let mut jump = JumpAbility::new(JumpConfig::default());
        let mut pound = GroundPoundAbility::new(GroundPoundConfig::default());
        dash.try_dash(&mut motor, Vec3::X);
        motor.take_events();
        let before = (motor.horizontal_velocity(), motor.vertical_velocity());

        assert!(jump.try_jump(&mut motor, true).is_none());
        assert!(jump.try_jump(&mut motor, false).is_none());
        assert!(!pound.try_ground_pound(&mut motor, false));

        assert_eq!((motor.horizontal_velocity(), motor.vertical_velocity()), before);
        assert_eq!(motor.state(), PlayerState::Dashing);
        assert!(motor.take_events().is_empty());
    }

    #[test]
    fn disabled_dash_never_triggers() {
        let mut motor = Motor::new(MotorConfig::default());
        let mut dash = DashAbility::new(DashConfig {
            can_dash: false,
            ..DashConfig::default()
        });
        assert!(!dash.try_dash(&mut motor, Vec3::X));
        assert_eq!(motor.state(), PlayerState::Idle);
    }
}
