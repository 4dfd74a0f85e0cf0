/// Minimal finite-state-machine container.
///
/// `S` is the state type (a fieldless enum). The machine tracks the current
/// state, the previous state, and how long it has been in the current state.
/// **Transition rules are kept out of the machine itself**: the motor's
/// classifier and the ability modules decide, the machine only records.
///
/// # Usage
/// ```ignore
/// let mut fsm = StateMachine::new(PlayerState::Idle);
/// // Each tick:
/// fsm.tick(dt);
/// if let Some(t) = fsm.go(next) { notify(t.previous, t.next); }
/// ```
#[derive(Debug, Clone)]
pub struct StateMachine<S: Copy + PartialEq> {
    state: S,
    previous: S,
    /// Seconds spent in the current state. Reset to 0.0 on each transition.
    elapsed: f32,
}

/// A recorded edge between two different states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub previous: S,
    pub next: S,
}

impl<S: Copy + PartialEq> StateMachine<S> {
    /// Create a new machine starting in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            previous: initial,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn previous(&self) -> S {
        self.previous
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Transition to `next` only if it differs from the current state.
    /// Returns the edge that fired, or `None` for a redundant request, so
    /// callers never publish a transition that did not happen.
    pub fn go(&mut self, next: S) -> Option<Transition<S>> {
        if self.state == next {
            return None;
        }
        self.previous = std::mem::replace(&mut self.state, next);
        self.elapsed = 0.0;
        Some(Transition {
            previous: self.previous,
            next,
        })
    }

    /// Advance the elapsed-in-state timer by `dt` seconds. Negative `dt` is
    /// treated as zero.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }
}
