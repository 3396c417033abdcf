use glam::Vec3;

/// Half-line used for pointer picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction. Degenerate directions fall back to -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest positive hit distance against a sphere, if any
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let half_b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;

        // direction is unit length, so a == 1
        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = -half_b - sqrt_d;
        if t > 1e-4 {
            return Some(t);
        }

        let t = -half_b + sqrt_d;
        if t > 1e-4 {
            Some(t)
        } else {
            None
        }
    }
}
