//! Surface description and the two scattering models: mirror and Lambertian.

use crate::{Ray, Sampler};
use glint_math::{Vec3, Vec3Ext};
use std::f32::consts::PI;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Offset applied along a scattered direction so the new ray does not
/// immediately re-hit the surface it left.
pub const SPAWN_OFFSET: f32 = 0.001;

/// How a surface responds to light: a tint and whether it is a perfect mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub reflective: bool,
}

impl Material {
    /// Lambertian surface with the given albedo.
    pub const fn diffuse(color: Color) -> Self {
        Self {
            color,
            reflective: false,
        }
    }

    /// Perfect mirror tinted by `color`.
    pub const fn mirror(color: Color) -> Self {
        Self {
            color,
            reflective: true,
        }
    }

    /// Pick the outgoing ray for a hit at `point` with surface `normal`.
    ///
    /// Mirrors reflect deterministically and draw nothing from the sampler.
    /// Diffuse surfaces draw exactly two uniforms for a cosine-weighted
    /// direction, so the cosine term cancels against the sampling density.
    pub fn scatter(&self, incoming: &Ray, point: Vec3, normal: Vec3, sampler: &mut Sampler) -> Ray {
        let direction = if self.reflective {
            reflect(incoming.direction, normal).normalize_or_self()
        } else {
            let r1 = sampler.next_f32();
            let r2 = sampler.next_f32();
            cosine_hemisphere(normal, r1, r2)
        };
        Ray::new(point + direction * SPAWN_OFFSET, direction)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5))
    }
}

/// Mirror `d` about `n`: d - 2(d·n)n.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * d.dot(n)
}

/// Orthonormal tangent frame `(u, v)` around a unit normal.
///
/// World up is the helper axis unless the normal is nearly parallel to it,
/// in which case world X keeps the cross product well conditioned.
pub fn tangent_frame(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if normal.y.abs() > 0.999 { Vec3::X } else { Vec3::Y };
    let u = normal.cross(helper).normalize_or_self();
    let v = normal.cross(u);
    (u, v)
}

/// Map two uniforms in [0, 1) to a cosine-weighted direction around `normal`.
pub fn cosine_hemisphere(normal: Vec3, r1: f32, r2: f32) -> Vec3 {
    let phi = 2.0 * PI * r1;
    let r = r2.sqrt();
    let (x, y, z) = (r * phi.cos(), r * phi.sin(), (1.0 - r2).max(0.0).sqrt());

    let (u, v) = tangent_frame(normal);
    (u * x + v * y + normal * z).normalize_or_self()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_tangent_frame_is_orthonormal() {
        let normals = [
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::X,
            Vec3::new(0.3, -0.2, 0.9).normalize(),
            Vec3::new(0.0, 0.9999, 0.01).normalize(),
        ];
        for n in normals {
            let (u, v) = tangent_frame(n);
            assert!((u.length() - 1.0).abs() < 1e-5, "u not unit for {n:?}");
            assert!((v.length() - 1.0).abs() < 1e-5, "v not unit for {n:?}");
            assert!(u.dot(n).abs() < 1e-5);
            assert!(v.dot(n).abs() < 1e-5);
            assert!(u.dot(v).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cosine_hemisphere_stays_above_surface() {
        let n = Vec3::new(0.2, 0.5, -0.8).normalize();
        for i in 0..16 {
            for j in 0..16 {
                let d = cosine_hemisphere(n, i as f32 / 16.0, j as f32 / 16.0);
                assert!((d.length() - 1.0).abs() < 1e-5);
                assert!(d.dot(n) >= -1e-6);
            }
        }
        // r2 = 0 is the pole.
        assert!((cosine_hemisphere(n, 0.3, 0.0) - n).length() < 1e-5);
    }

    #[test]
    fn test_cosine_weighting_mean() {
        // For p(w) = cos/pi, E[cos] = 2/3.
        let mut sampler = Sampler::new(7);
        let n = Vec3::Z;
        let count = 20_000;
        let mean: f32 = (0..count)
            .map(|_| {
                let (r1, r2) = (sampler.next_f32(), sampler.next_f32());
                cosine_hemisphere(n, r1, r2).dot(n)
            })
            .sum::<f32>()
            / count as f32;
        assert!((mean - 2.0 / 3.0).abs() < 0.01, "mean cos = {mean}");
    }

    #[test]
    fn test_mirror_scatter_consumes_no_randomness() {
        let mirror = Material::mirror(Color::ONE);
        let incoming = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0).normalize());
        let mut a = Sampler::new(3);
        let mut b = Sampler::new(3);

        let out = mirror.scatter(&incoming, Vec3::ZERO, Vec3::Y, &mut a);
        assert!(out.direction.y > 0.0);
        assert!((out.origin - out.direction * SPAWN_OFFSET).length() < 1e-6);
        assert_eq!(a.next_f32(), b.next_f32());
    }

    #[test]
    fn test_diffuse_scatter_leaves_surface() {
        let diffuse = Material::diffuse(Color::splat(0.5));
        let incoming = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut sampler = Sampler::new(11);
        for _ in 0..100 {
            let out = diffuse.scatter(&incoming, Vec3::ZERO, Vec3::Y, &mut sampler);
            assert!(out.direction.y >= 0.0);
            assert!(out.origin.y >= 0.0);
        }
    }
}
