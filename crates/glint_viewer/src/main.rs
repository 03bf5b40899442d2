use anyhow::{Context, Result};
use clap::Parser;
use glint_math::Camera;
use glint_renderer::{wall_clock_tick, Material, ProgressiveRenderer, RenderConfig};
use std::time::Instant;

mod cli;
mod demo;
mod loader;

use cli::Args;
use loader::{load_config, load_obj, MESH_COLOR};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config);

    if let Some(threads) = config.threads.filter(|&n| n > 0) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let mut meshes = Vec::new();
    if let Some(path) = &args.mesh {
        match load_obj(path, Material::diffuse(MESH_COLOR)) {
            Ok(mut mesh) => {
                mesh.set_scale(args.mesh_scale);
                mesh.translate(args.mesh_offset());
                mesh.build_bvh();
                meshes.push(mesh);
            }
            Err(e) => log::warn!("{}; continuing without it", e),
        }
    }
    let scene = demo::demo_scene(meshes);

    let camera = Camera::default().with_orientation(args.yaw, args.pitch);
    let mut renderer = ProgressiveRenderer::new(args.width, args.height, &config);

    log::info!(
        "Rendering {} frames at {}x{} ({} row bands)",
        args.frames,
        args.width,
        args.height,
        renderer.bands().len()
    );

    let start = Instant::now();
    let mut tick = args.seed.unwrap_or_else(wall_clock_tick);
    for _ in 0..args.frames {
        let stats = renderer.render_frame(&scene, &camera, tick);
        log::debug!("Frame {} in {:.2?}", stats.samples, stats.elapsed);

        // Step past every band start so no two frames share a band seed.
        let next = tick.wrapping_add(args.height as u64);
        tick = match args.seed {
            Some(_) => next,
            None => next.max(wall_clock_tick()),
        };
    }
    log::info!(
        "Accumulated {} samples per pixel in {:.2?}",
        renderer.frame_count() - 1,
        start.elapsed()
    );

    let rgba = renderer.buffer().to_rgba8();
    let image = image::RgbaImage::from_raw(args.width, args.height, rgba)
        .context("Frame buffer does not match image dimensions")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Wrote {}", args.output.display());
    Ok(())
}
