/// Slack for float accumulation when comparing elapsed time to a duration.
const TIME_EPSILON: f32 = 1e-5;

/// A run-to-completion sub-state advanced once per tick: `{elapsed, duration,
/// payload}`. Cancelling is dropping it.
#[derive(Debug, Clone)]
pub struct Timed<P> {
    elapsed: f32,
    duration: f32,
    payload: P,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Fraction of the duration covered so far, in `0..1`.
    Running(f32),
    Finished,
}

impl<P> Timed<P> {
    /// Negative durations are treated as zero (finishes on the first advance).
    pub fn new(duration: f32, payload: P) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
            payload,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32) -> Progress {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.progress()
    }

    pub fn progress(&self) -> Progress {
        if self.elapsed + TIME_EPSILON >= self.duration {
            Progress::Finished
        } else {
            Progress::Running(self.elapsed / self.duration)
        }
    }
}

/// Count a non-negative timer down by `dt`, snapping float residue to zero.
pub(crate) fn count_down(remaining: f32, dt: f32) -> f32 {
    let left = remaining - dt.max(0.0);
    if left <= TIME_EPSILON {
        0.0
    } else {
        left
    }
}
