use glam::Vec3;
use tracing::debug;

use crate::animation::AnimationCue;
use crate::components::PlayerState;
use crate::config::GroundPoundConfig;
use crate::events::MotorEvent;
use crate::motor::Motor;

/// Airborne slam. The impact event fires on the first grounded tick; the
/// `GroundPounding` lock is held until the animation reports the clip
/// finished via [`GroundPoundAbility::end_ground_pound`] and the body has
/// landed, whichever comes last.
pub struct GroundPoundAbility {
    config: GroundPoundConfig,
    has_landed: bool,
    /// Clip ended mid-air; release on impact.
    release_pending: bool,
}

impl GroundPoundAbility {
    pub fn new(config: GroundPoundConfig) -> Self {
        Self {
            config,
            has_landed: false,
            release_pending: false,
        }
    }

    pub fn has_landed(&self) -> bool {
        self.has_landed
    }

    pub fn try_ground_pound(&mut self, motor: &mut Motor, grounded: bool) -> bool {
        if !self.config.can_ground_pound || grounded || motor.is_locked() {
            return false;
        }
        motor.set_state(PlayerState::GroundPounding);
        motor.cue(AnimationCue::GroundPound);
        self.has_landed = false;
        self.release_pending = false;
        motor.set_horizontal_velocity(Vec3::ZERO);
        motor.set_vertical_velocity(self.config.ground_pound_force);
        true
    }

    /// Post-move landing latch: `GroundPoundLand` fires exactly once per pound.
    pub fn after_move(&mut self, motor: &mut Motor, grounded: bool) {
        if motor.state() == PlayerState::GroundPounding && grounded && !self.has_landed {
            self.has_landed = true;
            motor.emit(MotorEvent::GroundPoundLand);
            debug!("ground pound landed");
            if self.release_pending {
                self.release_pending = false;
                motor.set_state(PlayerState::Idle);
            }
        }
    }

    /// Animation callback: the pound clip is over, hand control back.
    /// Ignored unless the motor is actually ground pounding. Before impact
    /// the release waits for [`GroundPoundAbility::after_move`] to see the
    /// ground, so `Idle` is never entered in the air. Returns true when the
    /// lock was released now.
    pub fn end_ground_pound(&mut self, motor: &mut Motor) -> bool {
        if motor.state() != PlayerState::GroundPounding {
            return false;
        }
        if !self.has_landed {
            debug!("pound clip ended before impact; release deferred");
            self.release_pending = true;
            return false;
        }
        motor.set_state(PlayerState::Idle);
        true
    }

    pub fn is_release_pending(&self) -> bool {
        self.release_pending
    }

    /// Drop a deferred release.
    pub fn cancel(&mut self) {
        self.release_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::testing::ScriptedBody;
    use crate::config::MotorConfig;

    fn setup() -> (Motor, GroundPoundAbility) {
        (
            Motor::new(MotorConfig::default()),
            GroundPoundAbility::new(GroundPoundConfig::default()),
        )
    }

    fn lands(events: &[MotorEvent]) -> usize {
        events
            .iter()
            .filter(|e| **e == MotorEvent::GroundPoundLand)
            .count()
    }

    #[test]
    fn requires_airborne() {
        let (mut motor, mut pound) = setup();
        assert!(!pound.try_ground_pound(&mut motor, true));
        assert_eq!(motor.state(), PlayerState::Idle);
    }

    #[test]
    fn trigger_slams_down_and_locks() {
        let (mut motor, mut pound) = setup();
        motor.set_horizontal_velocity(Vec3::new(3.0, 0.0, 1.0));
        assert!(pound.try_ground_pound(&mut motor, false));
        assert_eq!(motor.state(), PlayerState::GroundPounding);
        assert_eq!(motor.horizontal_velocity(), Vec3::ZERO);
        assert_eq!(motor.vertical_velocity(), -30.0);
        assert_eq!(motor.take_cues(), vec![AnimationCue::GroundPound]);
    }

    #[test]
    fn landing_fires_once_over_many_grounded_ticks() {
        let (mut motor, mut pound) = setup();
        let mut body = ScriptedBody::airborne();
        pound.try_ground_pound(&mut motor, false);
        motor.tick(&mut body, 1.0 / 60.0);
        pound.after_move(&mut motor, body.grounded);

        body.grounded = true;
        let mut events = Vec::new();
        for tick in 0..10 {
            motor.tick(&mut body, 1.0 / 60.0);
            pound.after_move(&mut motor, body.grounded);
            let fired = motor.take_events();
            if tick == 0 {
                assert_eq!(lands(&fired), 1);
            }
            events.extend(fired);
        }
        assert_eq!(lands(&events), 1);
        assert!(pound.has_landed());
        assert_eq!(motor.state(), PlayerState::GroundPounding);
    }

    #[test]
    fn lock_outlives_landing_until_animation_ends() {
        let (mut motor, mut pound) = setup();
        pound.try_ground_pound(&mut motor, false);
        pound.after_move(&mut motor, true);
        assert_eq!(motor.state(), PlayerState::GroundPounding);

        assert!(pound.end_ground_pound(&mut motor));
        assert_eq!(motor.state(), PlayerState::Idle);
        assert!(!pound.end_ground_pound(&mut motor));
    }

    #[test]
    fn stray_end_callback_is_ignored() {
        let (mut motor, mut pound) = setup();
        motor.set_state(PlayerState::Falling);
        assert!(!pound.end_ground_pound(&mut motor));
        assert_eq!(motor.state(), PlayerState::Falling);
    }

    #[test]
    fn early_clip_end_waits_for_impact() {
        let (mut motor, mut pound) = setup();
        let mut body = ScriptedBody::airborne();
        pound.try_ground_pound(&mut motor, false);

        assert!(!pound.end_ground_pound(&mut motor));
        assert!(pound.is_release_pending());
        for _ in 0..5 {
            motor.tick(&mut body, 1.0 / 60.0);
            pound.after_move(&mut motor, body.grounded);
            assert_eq!(motor.state(), PlayerState::GroundPounding);
        }
        assert_eq!(lands(&motor.take_events()), 0);

        body.grounded = true;
        motor.tick(&mut body, 1.0 / 60.0);
        pound.after_move(&mut motor, body.grounded);
        assert_eq!(lands(&motor.take_events()), 1);
        assert_eq!(motor.state(), PlayerState::Idle);
        assert!(!pound.is_release_pending());
    }

    #[test]
    fn new_pound_forgets_deferred_release() {
        let (mut motor, mut pound) = setup();
        pound.try_ground_pound(&mut motor, false);
        pound.end_ground_pound(&mut motor);
        motor.set_state(PlayerState::Falling);

        pound.try_ground_pound(&mut motor, false);
        assert!(!pound.is_release_pending());
        pound.after_move(&mut motor, true);
        assert_eq!(motor.state(), PlayerState::GroundPounding);
    }

    #[test]
    fn second_pound_rearms_latch() {
        let (mut motor, mut pound) = setup();
        pound.try_ground_pound(&mut motor, false);
        pound.after_move(&mut motor, true);
        pound.end_ground_pound(&mut motor);
        motor.set_state(PlayerState::Falling);
        motor.take_events();

        pound.try_ground_pound(&mut motor, false);
        assert!(!pound.has_landed());
        pound.after_move(&mut motor, true);
        assert_eq!(lands(&motor.take_events()), 1);
    }
}
