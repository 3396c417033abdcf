use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::Ray;
use crate::types::CameraUniform;

/// Camera position plus the point it faces.
///
/// Orientation is never stored; it is derived from `target` whenever it is needed,
/// so position and facing cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub target: Vec3,
}

impl Pose {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(Vec3::Y)
            .try_normalize()
            // Looking straight up or down
            .unwrap_or(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up())
    }

    pub fn distance_to(&self, other: &Pose) -> f32 {
        self.position
            .distance(other.position)
            .max(self.target.distance(other.target))
    }

    pub fn to_uniform(&self, time: f32, projection: &Projection) -> CameraUniform {
        CameraUniform {
            position: self.position.to_array(),
            _pad1: 0.0,
            forward: self.forward().to_array(),
            _pad2: 0.0,
            right: self.right().to_array(),
            _pad3: 0.0,
            up: self.up().to_array(),
            time,
            target: self.target.to_array(),
            fov_y: projection.fov_y,
        }
    }
}

/// Perspective frustum parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Ray from the camera through a normalized device coordinate (x right, y up, both in [-1, 1])
    pub fn ray_through(&self, pose: &Pose, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = pose.forward()
            + pose.right() * ndc.x * half_width
            + pose.up() * ndc.y * half_height;

        Ray::new(pose.position, direction)
    }
}

/// Convert a window pixel position to normalized device coordinates
pub fn pixel_to_ndc(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new((x / w) * 2.0 - 1.0, 1.0 - (y / h) * 2.0)
}
