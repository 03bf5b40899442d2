//! Infinite ground plane at y = 0.

use crate::{
    hittable::{HitRecord, HIT_EPSILON},
    Color, Material, Ray,
};
use glint_math::Vec3;

/// Rays with a y direction at or above this are treated as not heading down.
const GRAZING_LIMIT: f32 = -0.001;

/// Analytic plane at y = 0 facing +Y, only visible from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub material: Material,
}

impl GroundPlane {
    pub const DEFAULT_COLOR: Color = Color::new(0.7, 0.7, 0.7);

    pub fn new(material: Material) -> Self {
        Self { material }
    }

    /// Same contract as [`crate::Hittable::hit`]. The plane has no finite
    /// bounds, so it sits outside the BVH and is not a `Hittable`.
    pub fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        if ray.direction.y >= GRAZING_LIMIT {
            return false;
        }

        let t = -ray.origin.y / ray.direction.y;
        if !(t >= HIT_EPSILON && t < rec.t) {
            return false;
        }

        rec.record(t, Vec3::Y, &self.material);
        true
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self::new(Material::diffuse(Self::DEFAULT_COLOR))
    }
}
