//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Color, Material, Ray};
use glint_math::{Aabb, Vec3};

/// Minimum accepted hit distance. Suppresses self-intersection at the
/// surface a ray was spawned from and rejects BVH boxes behind the origin.
pub const HIT_EPSILON: f32 = 0.001;

/// Starting distance budget for a nearest-hit query.
pub const FAR_T: f32 = 1e9;

/// Nearest intersection found so far.
///
/// Queries treat `t` as the distance to beat: a candidate only overwrites
/// the record when it is strictly closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Surface normal at intersection (unit length, not flipped toward the ray)
    pub normal: Vec3,
    /// Surface tint
    pub color: Color,
    /// Whether the surface is a perfect mirror
    pub reflective: bool,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self::with_budget(FAR_T)
    }
}

impl HitRecord {
    /// Empty record that only accepts hits closer than `t`.
    pub fn with_budget(t: f32) -> Self {
        Self {
            t,
            normal: Vec3::ZERO,
            color: Color::ZERO,
            reflective: false,
        }
    }

    /// Overwrite the record with a new, closer hit.
    #[inline]
    pub fn record(&mut self, t: f32, normal: Vec3, material: &Material) {
        self.t = t;
        self.normal = normal;
        self.color = material.color;
        self.reflective = material.reflective;
    }

    /// Material of the recorded surface.
    pub fn material(&self) -> Material {
        Material {
            color: self.color,
            reflective: self.reflective,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test the ray against this object.
    ///
    /// Returns true and overwrites `rec` only if a hit beyond the epsilon
    /// bias is strictly closer than `rec.t`.
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}
