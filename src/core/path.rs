use glam::{Vec2, Vec3};

use crate::camera::Pose;
use crate::config::CameraConfig;
use crate::math::lerp_exact;

/// Scripted camera rail: progress in [0, 1] maps to a pose between two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct PathInterpolator {
    start: Vec3,
    end: Vec3,
    look_ahead: f32,
    /// Dominant signed axis of travel
    axis: Vec3,
    /// Screen-right and screen-up for parallax, perpendicular to `axis`
    side: Vec3,
    lift: Vec3,
}

/// Dominant signed coordinate axis of `v`, or -Z for a zero vector
fn principal_axis(v: Vec3) -> Vec3 {
    let a = v.abs();
    if a.max_element() == 0.0 {
        Vec3::NEG_Z
    } else if a.x >= a.y && a.x >= a.z {
        Vec3::X * v.x.signum()
    } else if a.y >= a.z {
        Vec3::Y * v.y.signum()
    } else {
        Vec3::Z * v.z.signum()
    }
}

impl PathInterpolator {
    pub fn new(start: Vec3, end: Vec3, look_ahead: f32) -> Self {
        let axis = principal_axis(end - start);
        let side = axis.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let lift = side.cross(axis);
        Self {
            start,
            end,
            look_ahead,
            axis,
            side,
            lift,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            config.start_position,
            config.end_position,
            config.look_ahead_offset,
        )
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Pose at `progress`, looking `look_ahead` units down the path
    pub fn evaluate(&self, progress: f32) -> Pose {
        self.evaluate_with_parallax(progress, Vec2::ZERO)
    }

    /// As [`evaluate`](Self::evaluate), with the look-at target shifted by `parallax`
    /// (x to the right, y up). The position never moves.
    pub fn evaluate_with_parallax(&self, progress: f32, parallax: Vec2) -> Pose {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let position = lerp_exact(self.start, self.end, t);
        let target = position
            + self.axis * self.look_ahead
            + self.side * parallax.x
            + self.lift * parallax.y;

        Pose { position, target }
    }
}
