use glam::Vec3;
use tracing::debug;

use crate::animation::AnimationCue;
use crate::body::KinematicBody;
use crate::components::{look_rotation, Pose, PlayerState};
use crate::config::LedgeClimbConfig;
use crate::motor::Motor;

use super::timed::{Progress, Timed};

/// A ledge the character overlaps this tick, as reported by the overlap
/// query. `id` is stable for the ledge's lifetime and drives the enter latch.
#[derive(Debug, Clone, Copy)]
pub struct LedgeContact {
    pub id: u64,
    /// Ledge origin and orientation (local +X along the edge, +Z over it).
    pub pose: Pose,
    pub half_width: f32,
    pub climb_up_offset: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbPath {
    pub start: Pose,
    pub target: Pose,
}

impl ClimbPath {
    pub fn sample(&self, t: f32) -> Pose {
        self.start.interpolate(&self.target, t)
    }
}

/// Stand-up pose for a character at `position` climbing `ledge`: the nearest
/// point along the edge (clamped to its width), plus the climb-up offset in
/// the ledge's frame, facing over the ledge.
pub fn ledge_target(position: Vec3, ledge: &LedgeContact) -> Pose {
    let lateral = ledge.pose.rotation * Vec3::X;
    let along = (position - ledge.pose.position)
        .dot(lateral)
        .clamp(-ledge.half_width.abs(), ledge.half_width.abs());
    let grab_point = ledge.pose.position + lateral * along;
    let target = grab_point + ledge.pose.rotation * ledge.climb_up_offset;
    let forward = ledge.pose.rotation * Vec3::Z;
    let facing = look_rotation(forward).unwrap_or(ledge.pose.rotation);
    Pose::new(target, facing)
}

/// Direct-transform climb. While active the body is disabled and the motor
/// does no physics; position and facing are interpolated along a
/// [`ClimbPath`] and snapped to the target on completion.
pub struct LedgeClimbAbility {
    config: LedgeClimbConfig,
    active: Option<Timed<ClimbPath>>,
    /// Ledges overlapped last tick; only newly entered ledges can trigger.
    touching: Vec<u64>,
}

impl LedgeClimbAbility {
    pub fn new(config: LedgeClimbConfig) -> Self {
        Self {
            config,
            active: None,
            touching: Vec::new(),
        }
    }

    pub fn is_climbing(&self) -> bool {
        self.active.is_some()
    }

    pub fn path(&self) -> Option<&ClimbPath> {
        self.active.as_ref().map(|climb| climb.payload())
    }

    /// Feed this tick's overlaps. The first newly entered ledge starts a
    /// climb if the character is airborne and unlocked.
    pub fn touch(
        &mut self,
        motor: &mut Motor,
        body: &mut dyn KinematicBody,
        contacts: &[LedgeContact],
    ) -> bool {
        let entered = contacts
            .iter()
            .find(|c| !self.touching.contains(&c.id))
            .copied();
        self.touching = contacts.iter().map(|c| c.id).collect();

        match entered {
            Some(ledge) => self.try_begin(motor, body, &ledge),
            None => false,
        }
    }

    pub fn try_begin(
        &mut self,
        motor: &mut Motor,
        body: &mut dyn KinematicBody,
        ledge: &LedgeContact,
    ) -> bool {
        if motor.is_locked() || body.is_grounded() {
            return false;
        }
        let start = Pose::new(body.position(), motor.facing());
        let target = ledge_target(start.position, ledge);

        motor.set_state(PlayerState::LedgeClimbing);
        motor.cue(AnimationCue::LedgeClimb);
        body.set_enabled(false);
        debug!(ledge = ledge.id, from = ?start.position, to = ?target.position, "ledge climb");

        self.active = Some(Timed::new(
            self.config.ledge_climb_duration,
            ClimbPath { start, target },
        ));
        true
    }

    /// Advance an active climb by one tick.
    pub fn tick(&mut self, motor: &mut Motor, body: &mut dyn KinematicBody, dt: f32) {
        let Some(climb) = self.active.as_mut() else {
            return;
        };
        match climb.advance(dt) {
            Progress::Running(t) => {
                let pose = climb.payload().sample(t);
                body.set_position(pose.position);
                motor.set_facing(pose.rotation);
            }
            Progress::Finished => {
                self.finish(motor, body);
            }
        }
    }

    /// Animation callback, or the timer running out: snap to the target and
    /// hand control back. Returns `false` when no climb is active.
    pub fn end_ledge_climb(&mut self, motor: &mut Motor, body: &mut dyn KinematicBody) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.finish(motor, body);
        true
    }

    /// Drop the climb where it is and re-enable the body.
    pub fn cancel(&mut self, body: &mut dyn KinematicBody) {
        if self.active.take().is_some() {
            body.set_enabled(true);
        }
    }

    fn finish(&mut self, motor: &mut Motor, body: &mut dyn KinematicBody) {
        let Some(climb) = self.active.take() else {
            return;
        };
        let target = climb.payload().target;
        body.set_position(target.position);
        motor.set_facing(target.rotation);
        body.set_enabled(true);
        motor.set_horizontal_velocity(Vec3::ZERO);
        motor.set_vertical_velocity(0.0);
        if motor.state() == PlayerState::LedgeClimbing {
            motor.set_state(PlayerState::Idle);
        }
    }
}
