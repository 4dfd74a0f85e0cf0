//! Observation bus: state transitions and ability activations, delivered to
//! any number of independent listeners once per tick.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, trace, warn};

use crate::components::PlayerState;
use crate::error::ListenerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorEvent {
    StateChanged { previous: PlayerState, next: PlayerState },
    Jump,
    DoubleJump,
    Dash,
    GroundPoundLand,
    /// A foot hit the ground during the locomotion cycle.
    Footstep,
}

pub trait MotorListener {
    /// Short name used when reporting a failure.
    fn name(&self) -> &'static str;

    fn on_event(&mut self, event: &MotorEvent) -> Result<(), ListenerError>;
}

/// Ordered listener list. Failures are logged and never stop delivery to the
/// listeners after the failing one.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn MotorListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn MotorListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver each event to every listener, in subscription order.
    /// Returns the number of listener failures.
    pub fn dispatch<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = MotorEvent>,
    {
        let mut failures = 0;
        for event in events {
            for listener in &mut self.listeners {
                if let Err(err) = listener.on_event(&event) {
                    failures += 1;
                    warn!(listener = listener.name(), ?event, %err, "listener failed");
                }
            }
        }
        failures
    }
}

// ---------------------------------------------------------------------------
// Built-in listeners
// ---------------------------------------------------------------------------

/// Logs what an effects/audio layer would play: ability sounds, footsteps,
/// and landings derived from state transitions.
#[derive(Debug, Default)]
pub struct EffectsLog {
    landings: u32,
    footsteps: u32,
}

impl EffectsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn landings(&self) -> u32 {
        self.landings
    }

    pub fn footsteps(&self) -> u32 {
        self.footsteps
    }
}

impl MotorListener for EffectsLog {
    fn name(&self) -> &'static str {
        "effects"
    }

    fn on_event(&mut self, event: &MotorEvent) -> Result<(), ListenerError> {
        match *event {
            MotorEvent::StateChanged { previous, next } => {
                if previous.is_airborne() && next.is_grounded_state() {
                    self.landings += 1;
                    info!(from = %previous, to = %next, "landed");
                }
            }
            MotorEvent::Jump            => info!("jump"),
            MotorEvent::DoubleJump      => info!("double jump"),
            MotorEvent::Dash            => info!("dash"),
            MotorEvent::GroundPoundLand => info!("ground pound impact"),
            MotorEvent::Footstep => {
                self.footsteps += 1;
                trace!(count = self.footsteps, "footstep");
            }
        }
        Ok(())
    }
}

/// Shared, cloneable view of everything an [`EventRecorder`] has seen.
pub type EventLog = Rc<RefCell<Vec<MotorEvent>>>;

/// Appends every event to a shared log (timeline summaries, tests).
pub struct EventRecorder {
    log: EventLog,
}

impl EventRecorder {
    /// Returns the listener and a handle to its log.
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl MotorListener for EventRecorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn on_event(&mut self, event: &MotorEvent) -> Result<(), ListenerError> {
        self.log.borrow_mut().push(*event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl MotorListener for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn on_event(&mut self, _event: &MotorEvent) -> Result<(), ListenerError> {
            Err(ListenerError::Failed {
                listener: "broken",
                message: "speaker unplugged".into(),
            })
        }
    }

    #[test]
    fn failing_listener_does_not_block_others() {
        let mut bus = EventBus::new();
        let (recorder, log) = EventRecorder::new();
        bus.subscribe(Box::new(Broken));
        bus.subscribe(Box::new(recorder));

        let failures = bus.dispatch([MotorEvent::Jump, MotorEvent::Dash]);

        assert_eq!(failures, 2);
        assert_eq!(*log.borrow(), vec![MotorEvent::Jump, MotorEvent::Dash]);
    }

    #[test]
    fn effects_log_counts_landings() {
        let mut fx = EffectsLog::new();
        let land = MotorEvent::StateChanged {
            previous: PlayerState::Falling,
            next: PlayerState::Idle,
        };
        let takeoff = MotorEvent::StateChanged {
            previous: PlayerState::Moving,
            next: PlayerState::Jumping,
        };
        let sprint_landing = MotorEvent::StateChanged {
            previous: PlayerState::Jumping,
            next: PlayerState::Sprinting,
        };
        let pound_release = MotorEvent::StateChanged {
            previous: PlayerState::GroundPounding,
            next: PlayerState::Idle,
        };
        fx.on_event(&takeoff).unwrap();
        fx.on_event(&land).unwrap();
        fx.on_event(&sprint_landing).unwrap();
        fx.on_event(&pound_release).unwrap();
        assert_eq!(fx.landings(), 2);
    }

    #[test]
    fn effects_log_counts_footsteps() {
        let mut fx = EffectsLog::new();
        for _ in 0..3 {
            fx.on_event(&MotorEvent::Footstep).unwrap();
        }
        assert_eq!(fx.footsteps(), 3);
        assert_eq!(fx.landings(), 0);
    }

    #[test]
    fn empty_bus_accepts_events() {
        let mut bus = EventBus::new();
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.dispatch([MotorEvent::GroundPoundLand]), 0);
    }
}
