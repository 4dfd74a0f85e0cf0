//! The motor owns velocity, facing and the authoritative state machine, and
//! makes the single per-tick call into the kinematic body.

use glam::{Quat, Vec3};
use tracing::{debug, trace};

use crate::animation::{AnimationCue, AnimatorParams};
use crate::body::{CollisionFlags, KinematicBody};
use crate::components::{look_rotation, PlayerState};
use crate::config::MotorConfig;
use crate::events::MotorEvent;
use crate::fsm::StateMachine;

/// Intent below this magnitude never rotates the character.
const ROTATION_DEADZONE: f32 = 0.1;

pub struct Motor {
    config: MotorConfig,
    fsm: StateMachine<PlayerState>,
    horizontal: Vec3,
    vertical: f32,
    facing: Quat,
    /// Grounded fact from the body after the last physics move.
    grounded: bool,
    events: Vec<MotorEvent>,
    cues: Vec<AnimationCue>,
}

impl Motor {
    pub fn new(config: MotorConfig) -> Self {
        Self {
            config,
            fsm: StateMachine::new(PlayerState::Idle),
            horizontal: Vec3::ZERO,
            vertical: 0.0,
            facing: Quat::IDENTITY,
            grounded: false,
            events: Vec::new(),
            cues: Vec::new(),
        }
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn state(&self) -> PlayerState {
        self.fsm.state()
    }

    pub fn previous_state(&self) -> PlayerState {
        self.fsm.previous()
    }

    pub fn is_locked(&self) -> bool {
        self.state().is_locking()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn horizontal_velocity(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical
    }

    pub fn velocity(&self) -> Vec3 {
        self.horizontal + Vec3::Y * self.vertical
    }

    pub fn facing(&self) -> Quat {
        self.facing
    }

    pub fn forward(&self) -> Vec3 {
        self.facing * Vec3::Z
    }

    // -----------------------------------------------------------------------
    // Writes (unconditional; callers respect the lock)
    // -----------------------------------------------------------------------

    /// The Y component is discarded: horizontal velocity stays planar.
    pub fn set_horizontal_velocity(&mut self, velocity: Vec3) {
        self.horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    }

    pub fn set_vertical_velocity(&mut self, velocity: f32) {
        self.vertical = velocity;
    }

    pub fn set_facing(&mut self, facing: Quat) {
        self.facing = facing;
    }

    /// Explicit override used by abilities to enter and leave locking
    /// states. A request for the current state does nothing.
    pub fn set_state(&mut self, next: PlayerState) {
        self.transition(next);
    }

    /// Smoothly turn toward `direction` (exponential slerp). Skipped for the
    /// zero sentinel and anything under the deadzone.
    pub fn rotate_toward(&mut self, direction: Vec3, dt: f32) {
        if direction.length() < ROTATION_DEADZONE {
            return;
        }
        let Some(target) = look_rotation(direction) else {
            return;
        };
        let t = (self.config.rotation_smoothing * dt.max(0.0)).clamp(0.0, 1.0);
        self.facing = self.facing.slerp(target, t).normalize();
    }

    // -----------------------------------------------------------------------
    // Outbox
    // -----------------------------------------------------------------------

    pub fn emit(&mut self, event: MotorEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, cue: AnimationCue) {
        self.cues.push(cue);
    }

    pub fn take_events(&mut self) -> Vec<MotorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_cues(&mut self) -> Vec<AnimationCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn animator_params(&self) -> AnimatorParams {
        AnimatorParams {
            speed: Vec3::new(self.horizontal.x, 0.0, self.horizontal.z).length(),
            grounded: self.grounded,
            jumping: self.state() == PlayerState::Jumping,
            falling: self.state() == PlayerState::Falling,
        }
    }

    // -----------------------------------------------------------------------
    // Per-tick physics
    // -----------------------------------------------------------------------

    /// One physics step.
    ///
    /// - `LedgeClimbing`: the climb owns the transform, nothing happens.
    /// - `Dashing`: gravity is suspended, the dash velocity still moves the body.
    /// - `GroundPounding`: full physics, but no reclassification.
    /// - otherwise: gravity, move, ceiling clamp, reclassify.
    pub fn tick(&mut self, body: &mut dyn KinematicBody, dt: f32) {
        let dt = dt.max(0.0);
        self.fsm.tick(dt);

        let state = self.state();
        if state == PlayerState::LedgeClimbing {
            return;
        }

        if state != PlayerState::Dashing {
            self.apply_gravity(body.is_grounded(), dt);
        }

        let flags = body.move_by(self.velocity() * dt);
        if flags.contains(CollisionFlags::ABOVE) && self.vertical > 0.0 {
            self.vertical = self.config.ceiling_bounce;
        }

        self.grounded = body.is_grounded();
        trace!(state = %self.state(), grounded = self.grounded, vy = self.vertical, "motor tick");
        self.refresh_state(self.grounded);
    }

    fn apply_gravity(&mut self, grounded: bool, dt: f32) {
        if grounded && self.vertical < 0.0 {
            self.vertical = self.config.grounded_gravity;
        } else {
            self.vertical += self.config.gravity * dt;
        }
    }

    /// Pure classification from physical facts.
    pub fn classify(&self, grounded: bool) -> PlayerState {
        if grounded {
            let speed = self.horizontal.length();
            if speed > self.config.sprint_threshold {
                PlayerState::Sprinting
            } else if speed > self.config.move_threshold {
                PlayerState::Moving
            } else {
                PlayerState::Idle
            }
        } else if self.vertical > 0.0 {
            PlayerState::Jumping
        } else {
            PlayerState::Falling
        }
    }

    /// Reclassify and publish the edge if the state changed. Locked states
    /// are left alone.
    pub fn refresh_state(&mut self, grounded: bool) {
        if self.is_locked() {
            return;
        }
        let next = self.classify(grounded);
        self.transition(next);
    }

    fn transition(&mut self, next: PlayerState) {
        let time_in_state = self.fsm.elapsed();
        if let Some(t) = self.fsm.go(next) {
            debug!(from = %t.previous, to = %t.next, after = time_in_state, "state change");
            self.emit(MotorEvent::StateChanged {
                previous: t.previous,
                next: t.next,
            });
        }
    }
}
