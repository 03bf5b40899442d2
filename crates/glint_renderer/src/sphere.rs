//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable, HIT_EPSILON},
    Material, Ray,
};
use glint_math::{Aabb, Vec3, Vec3Ext};

/// An analytic sphere. Its bounding box is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return false;
        }
        let sqrtd = discriminant.sqrt();

        // Prefer the near root; fall back to the far one when the origin is
        // inside the sphere or the near root sits within the bias.
        let mut t = (-b - sqrtd) / a;
        if t < HIT_EPSILON {
            t = (-b + sqrtd) / a;
        }
        if !(t >= HIT_EPSILON && t < rec.t) {
            return false;
        }

        let normal = (ray.at(t) - self.center).normalize_or_self();
        rec.record(t, normal, &self.material);
        true
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::from_points(self.center - r, self.center + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.2, 0.2)),
        )
    }

    #[test]
    fn test_sphere_hit_head_on() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(rec.color, Color::new(1.0, 0.2, 0.2));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, &mut rec));
        assert_eq!(rec, HitRecord::default());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::Z);
        assert!(!sphere.hit(&ray, &mut HitRecord::default()));
    }

    #[test]
    fn test_sphere_from_inside_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_respects_budget() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);

        let mut rec = HitRecord::with_budget(3.0);
        assert!(!sphere.hit(&ray, &mut rec));
        assert_eq!(rec.t, 3.0);

        let mut rec = HitRecord::with_budget(4.5);
        assert!(sphere.hit(&ray, &mut rec));
    }

    #[test]
    fn test_sphere_bounding_box() {
        let bbox = unit_sphere().bounding_box();
        assert_eq!(bbox.min(), Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(bbox.max(), Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_zero_radius_does_not_panic() {
        let sphere = Sphere::new(Vec3::ZERO, 0.0, Material::default());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let _ = sphere.hit(&ray, &mut HitRecord::default());
    }
}
