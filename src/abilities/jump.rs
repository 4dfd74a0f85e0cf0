use crate::animation::AnimationCue;
use crate::config::JumpConfig;
use crate::events::MotorEvent;
use crate::motor::Motor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
}

/// Ground jump plus one optional air jump per airborne phase.
///
/// Jumping only writes velocity; the motor derives `Jumping` from the
/// positive vertical velocity on its next classification.
pub struct JumpAbility {
    config: JumpConfig,
    has_double_jumped: bool,
    was_grounded: bool,
}

impl JumpAbility {
    pub fn new(config: JumpConfig) -> Self {
        Self {
            config,
            has_double_jumped: false,
            was_grounded: false,
        }
    }

    pub fn has_double_jumped(&self) -> bool {
        self.has_double_jumped
    }

    pub fn try_jump(&mut self, motor: &mut Motor, grounded: bool) -> Option<JumpKind> {
        if motor.is_locked() {
            return None;
        }
        let launch = self.config.launch_speed(motor.config().gravity);

        if grounded {
            motor.set_vertical_velocity(launch);
            let damped = motor.horizontal_velocity() * self.config.air_momentum_multiplier;
            motor.set_horizontal_velocity(damped);
            motor.cue(AnimationCue::Jump);
            motor.emit(MotorEvent::Jump);
            Some(JumpKind::Ground)
        } else if self.config.can_double_jump && !self.has_double_jumped {
            self.has_double_jumped = true;
            motor.set_vertical_velocity(launch);
            motor.cue(AnimationCue::DoubleJump);
            motor.emit(MotorEvent::DoubleJump);
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    /// Post-move bookkeeping, every tick: the air jump comes back on the
    /// tick grounded becomes true.
    pub fn after_move(&mut self, grounded: bool) {
        if grounded && !self.was_grounded {
            self.has_double_jumped = false;
        }
        self.was_grounded = grounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerState;
    use crate::config::MotorConfig;
    use glam::Vec3;

    fn setup() -> (Motor, JumpAbility) {
        (
            Motor::new(MotorConfig::default()),
            JumpAbility::new(JumpConfig::default()),
        )
    }

    #[test]
    fn ground_jump_uses_projectile_launch_speed() {
        let (mut motor, mut jump) = setup();
        assert_eq!(jump.try_jump(&mut motor, true), Some(JumpKind::Ground));
        assert!((motor.vertical_velocity() - 80.0_f32.sqrt()).abs() < 1e-4);
        assert!((motor.vertical_velocity() - 8.944).abs() < 1e-3);
        assert_eq!(motor.take_events(), vec![MotorEvent::Jump]);
        assert_eq!(motor.take_cues(), vec![AnimationCue::Jump]);
    }

    #[test]
    fn ground_jump_dampens_momentum() {
        let (mut motor, mut jump) = setup();
        motor.set_horizontal_velocity(Vec3::new(5.0, 0.0, 0.0));
        jump.try_jump(&mut motor, true);
        assert!((motor.horizontal_velocity().x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn jump_does_not_change_state_directly() {
        let (mut motor, mut jump) = setup();
        jump.try_jump(&mut motor, true);
        assert_eq!(motor.state(), PlayerState::Idle);
    }

    #[test]
    fn double_jump_is_single_use() {
        let (mut motor, mut jump) = setup();
        jump.after_move(true);
        assert_eq!(jump.try_jump(&mut motor, true), Some(JumpKind::Ground));
        assert!(!jump.has_double_jumped());

        jump.after_move(false);
        motor.set_vertical_velocity(-1.0);
        assert_eq!(jump.try_jump(&mut motor, false), Some(JumpKind::Double));
        assert!(jump.has_double_jumped());

        motor.set_vertical_velocity(-3.0);
        assert_eq!(jump.try_jump(&mut motor, false), None);
        assert_eq!(motor.vertical_velocity(), -3.0);
    }

    #[test]
    fn landing_restores_double_jump() {
        let (mut motor, mut jump) = setup();
        jump.after_move(false);
        jump.try_jump(&mut motor, false);
        assert!(jump.has_double_jumped());
        jump.after_move(false);
        assert!(jump.has_double_jumped());
        jump.after_move(true);
        assert!(!jump.has_double_jumped());
    }

    #[test]
    fn disabled_double_jump_does_nothing_in_air() {
        let mut motor = Motor::new(MotorConfig::default());
        let mut jump = JumpAbility::new(JumpConfig {
            can_double_jump: false,
            ..JumpConfig::default()
        });
        assert_eq!(jump.try_jump(&mut motor, false), None);
        assert!(motor.take_events().is_empty());
    }

    #[test]
    fn locked_motor_ignores_jump() {
        let (mut motor, mut jump) = setup();
        motor.set_state(PlayerState::Dashing);
        motor.take_events();
        assert_eq!(jump.try_jump(&mut motor, true), None);
        assert_eq!(motor.vertical_velocity(), 0.0);
        assert!(motor.take_events().is_empty());
    }
}
