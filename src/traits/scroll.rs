/// External scroll position normalized to [0, 1]
pub trait ScrollSource {
    /// Current progress; implementations may return anything, callers clamp
    fn current_progress(&self) -> f32;

    /// Advance any smoothing by `delta` seconds
    fn update(&mut self, _delta: f32) {}

    /// True once after the progress changed since the last call
    fn take_changed(&mut self) -> bool;
}

/// Progress set directly by the host with no smoothing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedProgress {
    progress: f32,
    changed: bool,
}

impl FixedProgress {
    pub fn new(progress: f32) -> Self {
        Self {
            progress,
            changed: true,
        }
    }

    pub fn set(&mut self, progress: f32) {
        if progress != self.progress {
            self.progress = progress;
            self.changed = true;
        }
    }
}

impl ScrollSource for FixedProgress {
    fn current_progress(&self) -> f32 {
        self.progress
    }

    fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}
