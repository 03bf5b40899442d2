//! Recursive path tracing integrator.
//!
//! Each bounce finds the nearest scene hit and either mirrors the ray or
//! draws a cosine-weighted diffuse direction, multiplying the returned
//! radiance by the surface color. Paths are cut off at a fixed depth rather
//! than by Russian roulette, so energy beyond the cutoff is dropped.

use crate::{Color, Ray, RenderConfig, Sampler, Scene};

/// Turns primary rays into radiance estimates.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    /// Bounces before a path returns black
    pub max_depth: u32,
    /// Radiance of rays that leave the scene
    pub sky_color: Color,
}

impl Integrator {
    pub fn new(max_depth: u32, sky_color: Color) -> Self {
        Self {
            max_depth,
            sky_color,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.max_depth, config.sky_color())
    }

    /// Radiance carried back along `ray`, starting a fresh path.
    pub fn radiance(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler) -> Color {
        self.trace(ray, scene, sampler, 0)
    }

    /// Radiance along `ray` for a path already `depth` bounces long.
    pub fn trace(&self, ray: &Ray, scene: &Scene, sampler: &mut Sampler, depth: u32) -> Color {
        if depth >= self.max_depth {
            return Color::ZERO;
        }

        let Some(hit) = scene.closest_hit(ray) else {
            return self.sky_color;
        };

        let point = ray.at(hit.t);
        let scattered = hit.material().scatter(ray, point, hit.normal, sampler);
        hit.color * self.trace(&scattered, scene, sampler, depth + 1)
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
