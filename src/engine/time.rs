/// Fixed-timestep accumulator. Variable frame times go in, a whole number of
/// equal simulation steps comes out; the remainder carries to the next frame.
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    /// Upper bound on steps per frame, so a long stall can't spiral.
    max_steps: u32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(1e-4),
            accumulator: 0.0,
            max_steps: 8,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's elapsed time. Returns how many steps to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Fraction of a step left in the accumulator.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
