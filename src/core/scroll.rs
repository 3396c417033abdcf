use crate::config::ScrollConfig;
use crate::math::smoothing_factor;
use crate::traits::{ScrollDelta, ScrollSource};

/// Below this the smoothed progress snaps onto the raw target
const SETTLE_EPSILON: f32 = 1e-4;

/// Wheel-driven progress whose reported value trails the raw input.
///
/// Raw input moves `target` immediately; `current` follows it with an
/// exponential lag of `scrub` seconds, so the camera glides instead of
/// jumping a whole wheel notch at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubbedScroll {
    target: f32,
    current: f32,
    scrub: f32,
    line_step: f32,
    pixel_step: f32,
    changed: bool,
}

impl ScrubbedScroll {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            scrub: config.scrub,
            line_step: config.line_step,
            pixel_step: config.pixel_step,
            changed: true,
        }
    }

    /// Raw progress the smoothed value is heading for
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn apply(&mut self, delta: ScrollDelta) {
        let step = match delta {
            ScrollDelta::Lines(lines) => lines * self.line_step,
            ScrollDelta::Pixels(pixels) => pixels * self.pixel_step,
        };
        self.set_target(self.target + step);
    }

    /// Move the raw target; NaN is ignored
    pub fn set_target(&mut self, progress: f32) {
        if progress.is_nan() {
            return;
        }
        self.target = progress.clamp(0.0, 1.0);
        if self.scrub <= 0.0 {
            self.snap();
        }
    }

    /// Jump straight to the raw target
    pub fn snap(&mut self) {
        if self.current != self.target {
            self.current = self.target;
            self.changed = true;
        }
    }
}

impl ScrollSource for ScrubbedScroll {
    fn current_progress(&self) -> f32 {
        self.current
    }

    fn update(&mut self, delta: f32) {
        if self.is_settled() {
            return;
        }

        let gap = self.target - self.current;
        if gap.abs() < SETTLE_EPSILON {
            self.snap();
            return;
        }

        self.current += gap * smoothing_factor(delta, self.scrub);
        self.changed = true;
    }

    fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}
