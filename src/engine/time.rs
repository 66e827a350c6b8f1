/// Turns variable frame durations into a whole number of fixed ticks.
///
/// Leftover time carries over to the next frame. After a long stall at most
/// `max_ticks_per_frame` ticks run and the remainder is dropped.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_ticks_per_frame: u32,
}

impl FixedTimestep {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            step: 1.0 / ticks_per_second.max(1) as f32,
            accumulator: 0.0,
            max_ticks_per_frame: 4,
        }
    }

    pub fn with_max_ticks_per_frame(mut self, max_ticks: u32) -> Self {
        self.max_ticks_per_frame = max_ticks.max(1);
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds `dt` seconds and returns how many ticks are due.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        // Half-a-microsecond slack so a 60 Hz vsync frame reliably yields one tick
        let slack = 5.0e-7;
        let mut ticks = 0;
        while self.accumulator + slack >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator = (self.accumulator - self.step).max(0.0);
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame {
            self.accumulator = self.accumulator.min(self.step);
        }

        ticks
    }
}
