//! Per-character owner of the motor and its abilities.
//!
//! The character entity owns exactly one `PlayerController`; nothing reaches
//! it through global state. One call to [`PlayerController::tick`] runs the
//! whole per-tick pipeline in a fixed order:
//!
//! 1. ability timers (dash cooldown and burst, ledge-climb interpolation)
//! 2. unlocked only: intent → base locomotion → rotation → jump, dash,
//!    ground-pound triggers
//! 3. motor physics
//! 4. post-move latches (ground-pound impact, double-jump reset)
//!
//! Ledge overlaps are fed afterwards with [`PlayerController::touch_ledges`],
//! and [`PlayerController::flush`] publishes the tick's events and cues.

use glam::Vec3;
use tracing::{debug, trace};

use crate::abilities::{DashAbility, GroundPoundAbility, JumpAbility, LedgeClimbAbility, LedgeContact};
use crate::animation::{AnimationCallback, AnimationSink};
use crate::body::KinematicBody;
use crate::components::PlayerState;
use crate::config::TuningConfig;
use crate::engine::input::InputFrame;
use crate::events::{EventBus, MotorEvent};
use crate::locomotion::{CameraBasis, InputResolver};
use crate::motor::Motor;

pub struct PlayerController {
    motor: Motor,
    resolver: InputResolver,
    jump: JumpAbility,
    dash: DashAbility,
    ground_pound: GroundPoundAbility,
    ledge_climb: LedgeClimbAbility,
    /// Last resolved world-space intent (zero = none).
    intent: Vec3,
}

impl PlayerController {
    pub fn new(config: &TuningConfig) -> Self {
        Self {
            motor: Motor::new(config.motor.clone()),
            resolver: InputResolver::new(config.locomotion.clone()),
            jump: JumpAbility::new(config.jump.clone()),
            dash: DashAbility::new(config.dash.clone()),
            ground_pound: GroundPoundAbility::new(config.ground_pound.clone()),
            ledge_climb: LedgeClimbAbility::new(config.ledge_climb.clone()),
            intent: Vec3::ZERO,
        }
    }

    pub fn motor(&self) -> &Motor {
        &self.motor
    }

    pub fn state(&self) -> PlayerState {
        self.motor.state()
    }

    pub fn intent(&self) -> Vec3 {
        self.intent
    }

    pub fn dash(&self) -> &DashAbility {
        &self.dash
    }

    pub fn jump(&self) -> &JumpAbility {
        &self.jump
    }

    pub fn ground_pound(&self) -> &GroundPoundAbility {
        &self.ground_pound
    }

    pub fn ledge_climb(&self) -> &LedgeClimbAbility {
        &self.ledge_climb
    }

    pub fn tick(
        &mut self,
        frame: &InputFrame,
        camera: Option<&CameraBasis>,
        body: &mut dyn KinematicBody,
        dt: f32,
    ) {
        let dt = dt.max(0.0);
        let grounded = body.is_grounded();

        self.dash.tick(&mut self.motor, dt);
        self.ledge_climb.tick(&mut self.motor, body, dt);

        self.intent = self.resolver.resolve(frame.move_axis, camera);
        if !self.motor.is_locked() {
            let horizontal = self.resolver.horizontal_velocity(
                self.motor.horizontal_velocity(),
                self.intent,
                grounded,
                frame.sprint,
                dt,
            );
            self.motor.set_horizontal_velocity(horizontal);
            self.motor.rotate_toward(self.intent, dt);

            if frame.jump {
                self.jump.try_jump(&mut self.motor, grounded);
            }
            if frame.dash {
                self.dash.try_dash(&mut self.motor, self.intent);
            }
            if frame.ground_pound {
                self.ground_pound.try_ground_pound(&mut self.motor, grounded);
            }
        } else {
            trace!(state = %self.motor.state(), "locked; input ignored");
        }

        self.motor.tick(body, dt);

        let grounded = body.is_grounded();
        self.ground_pound.after_move(&mut self.motor, grounded);
        self.jump.after_move(grounded);
    }

    /// Ledges the body overlaps after this tick's move.
    pub fn touch_ledges(&mut self, body: &mut dyn KinematicBody, contacts: &[LedgeContact]) -> bool {
        self.ledge_climb.touch(&mut self.motor, body, contacts)
    }

    /// Publish the tick's events to the bus and cues/parameters to the
    /// animation collaborator. Without one, cues are dropped.
    pub fn flush(&mut self, bus: &mut EventBus, animation: Option<&mut dyn AnimationSink>) {
        bus.dispatch(self.motor.take_events());
        let cues = self.motor.take_cues();
        match animation {
            Some(sink) => {
                for cue in cues {
                    sink.trigger(cue);
                }
                sink.set_parameters(self.motor.animator_params());
            }
            None if !cues.is_empty() => trace!(count = cues.len(), "no animation sink; cues dropped"),
            None => {}
        }
    }

    /// Route an animator notification to whatever waits for it.
    pub fn on_animation(&mut self, callback: AnimationCallback, body: &mut dyn KinematicBody) -> bool {
        match callback {
            AnimationCallback::EndGroundPound => self.end_ground_pound(),
            AnimationCallback::EndLedgeClimb => self.end_ledge_climb(body),
            AnimationCallback::Footstep => self.footstep(body),
        }
    }

    /// Foot contact from the walk/run cycle. Published only while the body
    /// is on the ground in a grounded state.
    pub fn footstep(&mut self, body: &dyn KinematicBody) -> bool {
        if !body.is_grounded() || !self.motor.state().is_grounded_state() {
            return false;
        }
        self.motor.emit(MotorEvent::Footstep);
        true
    }

    pub fn end_ground_pound(&mut self) -> bool {
        self.ground_pound.end_ground_pound(&mut self.motor)
    }

    pub fn end_ledge_climb(&mut self, body: &mut dyn KinematicBody) -> bool {
        self.ledge_climb.end_ledge_climb(&mut self.motor, body)
    }

    /// Forced stop (respawn, knockback): drop any timed ability, re-enable the
    /// body, zero velocity and release the lock to `Falling`.
    pub fn interrupt(&mut self, body: &mut dyn KinematicBody) {
        self.dash.cancel();
        self.ground_pound.cancel();
        self.ledge_climb.cancel(body);
        self.motor.set_horizontal_velocity(Vec3::ZERO);
        self.motor.set_vertical_velocity(0.0);
        if self.motor.is_locked() {
            debug!(state = %self.motor.state(), "ability interrupted");
            self.motor.set_state(PlayerState::Falling);
        }
    }
}
