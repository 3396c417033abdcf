/// Self-contained timers - each accumulates delta time and decides when to fire

/// Fixed rate timer - counts whole steps of a given Hz as delta time accumulates
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns the number of whole steps elapsed (capped at `max_steps`)
    pub fn steps(&mut self, delta: f32, max_steps: u32) -> u32 {
        self.accumulator += delta.max(0.0);
        let steps = ((self.accumulator / self.interval) as u32).min(max_steps);
        self.accumulator -= steps as f32 * self.interval;
        // Drop backlog beyond the cap instead of replaying it later
        if steps == max_steps {
            self.accumulator = self.accumulator.min(self.interval);
        }
        steps
    }
}

/// Countdown timer - fires once after duration
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Countdown {
    /// Create inactive countdown
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Create a countdown that is already running
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::new(duration);
        countdown.start();
        countdown
    }

    /// Start countdown
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}
