mod easing;
mod ray;

pub use easing::{EaseKind, Easing, UnknownEasing};
pub use ray::Ray;

use glam::Vec3;

/// Componentwise lerp that is exact at both ends (`t == 0` gives `a`, `t == 1` gives `b`)
pub fn lerp_exact(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Frame-rate independent smoothing factor for an exponential follow with time constant `tau`
pub fn smoothing_factor(delta: f32, tau: f32) -> f32 {
    if tau <= 0.0 {
        1.0
    } else {
        1.0 - (-delta / tau).exp()
    }
}

/// Follow factor for `delta` seconds, given a factor tuned per frame at 60 Hz
pub fn follow_factor(per_frame: f32, delta: f32) -> f32 {
    let per_frame = per_frame.clamp(0.0, 1.0);
    if per_frame >= 1.0 {
        return 1.0;
    }
    1.0 - (1.0 - per_frame).powf(delta.max(0.0) * 60.0)
}
