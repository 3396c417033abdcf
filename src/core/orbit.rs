use std::f32::consts::TAU;

use glam::Vec3;

use crate::camera::Pose;
use crate::config::OrbitCameraConfig;
use crate::math::follow_factor;

/// Share of the remaining radius/height gap closed per 60 Hz frame after entry
const SETTLE_PER_FRAME: f32 = 0.02;

/// Circles a fixed point at constant angular speed with a slow vertical bob.
///
/// An orbit entered from an arbitrary camera position starts at that
/// position's radius and height and eases out to the configured ones, so the
/// hand-off from the arrival flight has no jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitMotion {
    center: Vec3,
    angle: f32,
    radius: f32,
    height: f32,
    rest_radius: f32,
    rest_height: f32,
    angular_speed: f32,
    bob_amplitude: f32,
}

impl OrbitMotion {
    /// Orbit `center` starting at angle 0
    pub fn new(center: Vec3, config: &OrbitCameraConfig) -> Self {
        Self {
            center,
            angle: 0.0,
            radius: config.radius,
            height: config.height,
            rest_radius: config.radius,
            rest_height: config.height,
            angular_speed: config.speed,
            bob_amplitude: config.bob_amplitude,
        }
    }

    /// Orbit `center`, starting exactly where the camera currently sits
    pub fn entered_from(center: Vec3, camera: Vec3, config: &OrbitCameraConfig) -> Self {
        let offset = camera - center;
        let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();
        if horizontal <= f32::EPSILON {
            return Self::new(center, config);
        }

        let angle = offset.z.atan2(offset.x);
        let mut orbit = Self::new(center, config).with_angle(angle);
        orbit.radius = horizontal;
        orbit.height = offset.y - (angle * 0.5).sin() * orbit.bob_amplitude;
        orbit
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Accumulated angle, unbounded
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current horizontal distance from the centre
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Angle wrapped to [0, 2π) for display
    pub fn display_angle(&self) -> f32 {
        self.angle.rem_euclid(TAU)
    }

    pub fn pose(&self) -> Pose {
        let a = self.angle;
        let offset = Vec3::new(
            a.cos() * self.radius,
            self.height + (a * 0.5).sin() * self.bob_amplitude,
            a.sin() * self.radius,
        );
        Pose::new(self.center + offset, self.center)
    }

    /// Advance by `delta` seconds and return the new pose
    pub fn tick(&mut self, delta: f32) -> Pose {
        self.angle += self.angular_speed * delta;
        let k = follow_factor(SETTLE_PER_FRAME, delta);
        self.radius += (self.rest_radius - self.radius) * k;
        self.height += (self.rest_height - self.height) * k;
        self.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn flat_config() -> OrbitCameraConfig {
        OrbitCameraConfig {
            speed: 0.5,
            radius: 10.0,
            height: 3.0,
            bob_amplitude: 0.0,
        }
    }

    #[test]
    fn opposite_angles_are_symmetric() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let a = OrbitMotion::new(center, &flat_config()).pose();
        let b = OrbitMotion::new(center, &flat_config()).with_angle(PI).pose();

        let (da, db) = (a.position - center, b.position - center);
        assert!((da.x - 10.0).abs() < 1e-5);
        assert!((db.x + 10.0).abs() < 1e-5);
        assert!(da.z.abs() < 1e-5 && db.z.abs() < 1e-5);
        assert!((da.y - 3.0).abs() < 1e-5 && (db.y - 3.0).abs() < 1e-5);
        assert!(((a.position + b.position) * 0.5 - (center + Vec3::Y * 3.0)).length() < 1e-4);
    }

    #[test]
    fn always_faces_center() {
        let center = Vec3::new(-4.0, 2.0, 7.0);
        let mut orbit = OrbitMotion::new(center, &OrbitCameraConfig::default());
        for _ in 0..50 {
            let pose = orbit.tick(0.1);
            assert_eq!(pose.target, center);
            let horizontal = (pose.position - center) * Vec3::new(1.0, 0.0, 1.0);
            assert!((horizontal.length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn angle_accumulates_with_speed() {
        let mut orbit = OrbitMotion::new(Vec3::ZERO, &flat_config());
        for _ in 0..10 {
            orbit.tick(0.1);
        }
        assert!((orbit.angle() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn angle_is_unbounded_but_display_wraps() {
        let mut orbit = OrbitMotion::new(Vec3::ZERO, &flat_config());
        orbit.tick(40.0);
        assert!(orbit.angle() > TAU);
        assert!(orbit.display_angle() >= 0.0 && orbit.display_angle() < TAU);
        let wrapped = orbit.with_angle(orbit.display_angle()).pose();
        assert!((wrapped.position.x - orbit.pose().position.x).abs() < 1e-3);
        assert!((wrapped.position.z - orbit.pose().position.z).abs() < 1e-3);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let config = OrbitCameraConfig {
            bob_amplitude: 0.5,
            ..flat_config()
        };
        let mut orbit = OrbitMotion::new(Vec3::ZERO, &config);
        for _ in 0..400 {
            let y = orbit.tick(0.05).position.y;
            assert!(y >= 2.5 - 1e-5 && y <= 3.5 + 1e-5);
        }
    }

    #[test]
    fn entry_angle_follows_arrival_side() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let orbit = OrbitMotion::entered_from(center, Vec3::new(18.0, 3.0, 4.0), &flat_config());
        let arrived = Vec3::new(8.0, 0.0, 4.0).normalize();
        let start = (orbit.pose().position - center) * Vec3::new(1.0, 0.0, 1.0);
        assert!((start.normalize() - arrived).length() < 1e-5);
    }

    #[test]
    fn entry_continues_from_arrival_and_settles() {
        let center = Vec3::new(10.0, 0.0, 0.0);
        let arrival = Vec3::new(18.0, 3.0, 4.0);
        let config = OrbitCameraConfig {
            speed: 0.15,
            ..OrbitCameraConfig::default()
        };
        let mut orbit = OrbitMotion::entered_from(center, arrival, &config);
        assert!((orbit.pose().position - arrival).length() < 1e-4);

        let dt = 1.0 / 60.0;
        let mut last = arrival;
        for _ in 0..600 {
            let position = orbit.tick(dt).position;
            let step = position.distance(last);
            assert!(step < 0.05, "orbit stepped {} in one frame", step);
            last = position;
        }
        assert!((orbit.radius() - config.radius).abs() < 1e-3);
    }

    #[test]
    fn zero_speed_holds_still() {
        let config = OrbitCameraConfig {
            speed: 0.0,
            ..flat_config()
        };
        let mut orbit = OrbitMotion::new(Vec3::ZERO, &config);
        let first = orbit.tick(1.0);
        assert_eq!(orbit.tick(1.0), first);
    }
}
