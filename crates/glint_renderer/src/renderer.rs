//! Progressive frame loop.
//!
//! Each call to [`ProgressiveRenderer::render_frame`] adds one jittered
//! sample per pixel. Work is split into contiguous row bands, one task per
//! band, each with its own [`Sampler`]. The accumulation restarts whenever
//! the camera moves.

use crate::{
    row_bands, tone_map, AccumulationBuffer, BandTarget, Color, Integrator, RowBand, Sampler,
    Scene,
};
use glint_math::{Camera, CameraState};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Bounces before a path returns black
    pub max_depth: u32,
    /// Linear RGB radiance of escaping rays
    pub sky_color: [f32; 3],
    /// Number of row bands per frame; `None` uses the rayon pool size
    pub threads: Option<usize>,
}

impl RenderConfig {
    pub fn sky_color(&self) -> Color {
        Color::from_array(self.sky_color)
    }

    /// Row bands per frame.
    pub fn band_count(&self) -> usize {
        self.threads
            .filter(|&n| n > 0)
            .unwrap_or_else(rayon::current_num_threads)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            sky_color: [0.2, 0.3, 0.6],
            threads: None,
        }
    }
}

/// How row bands are executed within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// One rayon task per band
    #[default]
    Parallel,
    /// Bands run in order on the calling thread
    Sequential,
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    /// Samples per pixel contained in the display buffer after this frame
    pub samples: u32,
    /// Whether accumulation restarted before this frame
    pub reset: bool,
    pub elapsed: Duration,
}

/// Owns the accumulation state and drives frames over a shared scene.
pub struct ProgressiveRenderer {
    integrator: Integrator,
    buffer: AccumulationBuffer,
    bands: Vec<RowBand>,
    dispatch: Dispatch,
    last_camera: Option<CameraState>,
    reset_requested: bool,
}

impl ProgressiveRenderer {
    pub fn new(width: u32, height: u32, config: &RenderConfig) -> Self {
        let bands = row_bands(height, config.band_count());
        log::debug!(
            "Progressive renderer {}x{}: {} row bands, max depth {}",
            width,
            height,
            bands.len(),
            config.max_depth
        );

        Self {
            integrator: Integrator::from_config(config),
            buffer: AccumulationBuffer::new(width, height),
            bands,
            dispatch: Dispatch::default(),
            last_camera: None,
            reset_requested: false,
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn set_dispatch(&mut self, dispatch: Dispatch) {
        self.dispatch = dispatch;
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn buffer(&self) -> &AccumulationBuffer {
        &self.buffer
    }

    pub fn bands(&self) -> &[RowBand] {
        &self.bands
    }

    /// Current value of the frame counter.
    pub fn frame_count(&self) -> u32 {
        self.buffer.frame_count()
    }

    /// Restart accumulation before the next frame, e.g. after the scene changed.
    pub fn reset(&mut self) {
        self.reset_requested = true;
    }

    /// Render one frame with the configured dispatch.
    pub fn render_frame(&mut self, scene: &Scene, camera: &Camera, tick: u64) -> FrameStats {
        self.render_frame_with(scene, camera, tick, self.dispatch)
    }

    /// Render one frame with an explicit dispatch mode.
    pub fn render_frame_with(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        tick: u64,
        dispatch: Dispatch,
    ) -> FrameStats {
        let start = Instant::now();

        let state = camera.state();
        let moved = self.last_camera.is_some_and(|last| last != state);
        let reset = moved || self.reset_requested;
        if reset {
            self.buffer.reset();
            self.reset_requested = false;
            log::debug!("Accumulation reset (camera moved: {})", moved);
        }
        self.last_camera = Some(state);

        let width = self.buffer.width();
        let height = self.buffer.height();
        let integrator = self.integrator;
        let (targets, frame) = self.buffer.split_bands(&self.bands);

        let job = BandJob {
            scene,
            camera,
            integrator: &integrator,
            frame,
            width,
            height,
            tick,
        };

        match dispatch {
            Dispatch::Parallel => targets.into_par_iter().for_each(|t| job.render(t)),
            Dispatch::Sequential => targets.into_iter().for_each(|t| job.render(t)),
        }

        let samples = self.buffer.frame_count();
        self.buffer.advance();

        let elapsed = start.elapsed();
        log::trace!("Frame {} rendered in {:.2?}", samples, elapsed);

        FrameStats {
            samples,
            reset,
            elapsed,
        }
    }
}

/// Read-only state shared by every band task of one frame.
struct BandJob<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    integrator: &'a Integrator,
    frame: &'a AtomicU32,
    width: u32,
    height: u32,
    tick: u64,
}

impl BandJob<'_> {
    fn render(&self, target: BandTarget<'_>) {
        let BandTarget { band, sums, pixels } = target;
        let mut sampler = Sampler::new(band.seed(self.tick));

        let width = self.width as f32;
        let height = self.height as f32;
        let aspect = width / height;
        let row_len = self.width as usize;

        for (row, y) in (band.start..band.end).enumerate() {
            for x in 0..self.width {
                let u = ((x as f32 + sampler.next_f32()) / width * 2.0 - 1.0) * aspect;
                let v = (y as f32 + sampler.next_f32()) / height * 2.0 - 1.0;
                let ray = self.camera.get_ray(u, -v);
                let color = self.integrator.radiance(&ray, self.scene, &mut sampler);

                let i = row * row_len + x as usize;
                sums[i] += color;
                pixels[i] = tone_map(sums[i], self.frame.load(Ordering::Acquire));
            }
        }
    }
}

/// Frame tick from the wall clock in milliseconds.
pub fn wall_clock_tick() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.sky_color(), Color::new(0.2, 0.3, 0.6));
        assert!(config.band_count() >= 1);
    }

    #[test]
    fn test_partial_json_config() {
        let config: RenderConfig = serde_json::from_str(r#"{ "threads": 3 }"#).unwrap();
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.band_count(), 3);
        assert_eq!(config.max_depth, 5);

        let config: RenderConfig =
            serde_json::from_str(r#"{ "max_depth": 2, "sky_color": [1.0, 1.0, 1.0] }"#).unwrap();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.sky_color(), Color::ONE);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_zero_threads_falls_back_to_pool() {
        let config = RenderConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert_eq!(config.band_count(), rayon::current_num_threads());
    }

    #[test]
    fn test_sky_only_frame_is_uniform() {
        let config = RenderConfig {
            threads: Some(2),
            ..Default::default()
        };
        let scene = Scene::default().with_ground(None);
        let camera = Camera::default();
        let mut renderer = ProgressiveRenderer::new(8, 6, &config);

        let stats = renderer.render_frame(&scene, &camera, 1);
        assert_eq!(stats.samples, 1);
        assert!(!stats.reset);

        let expected = tone_map(config.sky_color(), 1);
        assert!(renderer.buffer().pixels().iter().all(|&p| p == expected));
        assert_eq!(renderer.frame_count(), 2);
    }

    #[test]
    fn test_explicit_reset() {
        let config = RenderConfig::default();
        let scene = Scene::default();
        let camera = Camera::default();
        let mut renderer = ProgressiveRenderer::new(4, 4, &config);

        renderer.render_frame(&scene, &camera, 1);
        renderer.render_frame(&scene, &camera, 2);
        assert_eq!(renderer.frame_count(), 3);

        renderer.reset();
        let stats = renderer.render_frame(&scene, &camera, 3);
        assert!(stats.reset);
        assert_eq!(stats.samples, 1);
        assert_eq!(renderer.frame_count(), 2);

        // The request is consumed by one frame.
        let stats = renderer.render_frame(&scene, &camera, 4);
        assert!(!stats.reset);
    }

    #[test]
    fn test_camera_move_resets() {
        let config = RenderConfig::default();
        let scene = Scene::default();
        let mut camera = Camera::default();
        let mut renderer = ProgressiveRenderer::new(4, 4, &config);

        renderer.render_frame(&scene, &camera, 1);
        renderer.render_frame(&scene, &camera, 2);

        camera.translate(Vec3::new(0.0, 0.0, -1.0));
        let stats = renderer.render_frame(&scene, &camera, 3);
        assert!(stats.reset);
        assert_eq!(stats.samples, 1);
    }
}
