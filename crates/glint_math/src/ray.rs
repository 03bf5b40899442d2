use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not forced to unit length, but every ray the renderer
/// spawns is normalized. The ground-plane and slab tests are scale-invariant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let ray = Ray::default();
        assert_eq!(ray.origin, Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::new(0.0, 0.0, -1.0));
    }
}
