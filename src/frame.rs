use std::time::Instant;

use crate::traits::frame::FrameSource;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the first frame
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }
}

/// Infinite iterator that yields wall-clock frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    last_delta: f32,
    /// Deltas above this are clamped (window drags, debugger pauses)
    max_delta: f32,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            last_delta: 0.0,
            max_delta: 0.1,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = Instant::now();
        let delta = now
            .duration_since(self.last_frame_time)
            .as_secs_f32()
            .min(self.max_delta);
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;
        self.last_delta = delta;

        Some(info)
    }
}

impl FrameSource for FrameIterator {
    fn delta_time(&self) -> f32 {
        self.last_delta
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

/// Deterministic frames at a fixed rate, for scripted replay and tests
#[derive(Debug, Clone)]
pub struct FixedStepFrames {
    frame_number: u64,
    hz: f32,
    step: f32,
}

impl FixedStepFrames {
    pub fn new(hz: f32) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 60.0 };
        Self {
            frame_number: 0,
            hz,
            step: 1.0 / hz,
        }
    }

    pub fn rate(&self) -> f32 {
        self.hz
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        // Multiply rather than accumulate so time does not drift
        let number = self.frame_number;
        let info = FrameInfo::new(number, (number + 1) as f32 * self.step, self.step);
        self.frame_number += 1;
        Some(info)
    }
}

impl FrameSource for FixedStepFrames {
    fn delta_time(&self) -> f32 {
        self.step
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}
