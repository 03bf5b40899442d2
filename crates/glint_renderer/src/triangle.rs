//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! Shading is flat: the face normal follows the winding `(v1-v0)×(v2-v0)`.

use crate::{
    hittable::{HitRecord, Hittable, HIT_EPSILON},
    Material, Ray,
};
use glint_math::{Aabb, Vec3, Vec3Ext};

/// Determinant threshold below which a ray counts as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-7;

/// An immutable triangle with precomputed normal and bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length, zero for degenerate triangles)
    normal: Vec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_self();
        let bbox = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));

        Self {
            v0,
            v1,
            v2,
            normal,
            material,
            bbox,
        }
    }

    /// A new triangle with every vertex mapped through `v * scale + offset`.
    pub fn transformed(&self, scale: f32, offset: Vec3) -> Self {
        Self::new(
            self.v0 * scale + offset,
            self.v1 * scale + offset,
            self.v2 * scale + offset,
            self.material,
        )
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> Material {
        self.material
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle (or the triangle is degenerate)
        if a.abs() < PARALLEL_EPSILON {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if !(t > HIT_EPSILON && t < rec.t) {
            return false;
        }

        rec.record(t, self.normal, &self.material);
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
