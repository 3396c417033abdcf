use glam::Vec2;

use crate::config::ParallaxConfig;
use crate::math::follow_factor;

/// Smoothed pointer offset applied to the scroll-driven look-at target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseParallax {
    intensity: f32,
    smoothing: f32,
    target: Vec2,
    current: Vec2,
}

impl MouseParallax {
    pub fn new(config: &ParallaxConfig) -> Self {
        Self {
            intensity: config.intensity,
            smoothing: config.smoothing,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
        }
    }

    /// Pointer in normalized device coordinates (y up)
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.target = ndc.clamp(Vec2::NEG_ONE, Vec2::ONE) * self.intensity;
    }

    /// Pointer left the view; drift back to centre
    pub fn clear_pointer(&mut self) {
        self.target = Vec2::ZERO;
    }

    pub fn update(&mut self, delta: f32) -> Vec2 {
        let t = follow_factor(self.smoothing, delta);
        self.current += (self.target - self.current) * t;
        self.current
    }

    pub fn offset(&self) -> Vec2 {
        self.current
    }
}
