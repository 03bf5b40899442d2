use clap::{Parser, ValueEnum};
use glint_renderer::RenderConfig;
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Progressive Monte Carlo path tracer")]
pub struct Args {
    /// JSON render configuration; command line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,

    #[arg(long, default_value = "1080", help = "Image width in pixels")]
    pub width: u32,

    #[arg(long, default_value = "720", help = "Image height in pixels")]
    pub height: u32,

    /// Progressive frames to accumulate before writing the image
    #[arg(short, long, default_value = "16")]
    pub frames: u32,

    /// Fixed seed for reproducible output; the wall clock is used otherwise
    #[arg(long)]
    pub seed: Option<u64>,

    /// OBJ mesh to add to the scene
    #[arg(short, long)]
    pub mesh: Option<PathBuf>,

    /// Mesh placement offset as x,y,z
    #[arg(long, value_delimiter = ',', default_value = "0,1,-5", allow_hyphen_values = true)]
    pub mesh_offset: Vec<f32>,

    #[arg(long, default_value = "1.0", help = "Uniform mesh scale")]
    pub mesh_scale: f32,

    /// Camera yaw in degrees
    #[arg(long, default_value = "-90", allow_negative_numbers = true)]
    pub yaw: f32,

    /// Camera pitch in degrees, clamped to +/-89
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub pitch: f32,

    #[arg(short, long, default_value = "glint.png", help = "Output PNG path")]
    pub output: PathBuf,

    /// Worker threads and row bands per frame
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Maximum path depth
    #[arg(long)]
    pub max_depth: Option<u32>,
}

impl Args {
    /// Apply command line overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
    }

    /// Mesh offset, or the default placement when not given as three values.
    pub fn mesh_offset(&self) -> glint_math::Vec3 {
        match self.mesh_offset.as_slice() {
            [x, y, z] => glint_math::Vec3::new(*x, *y, *z),
            _ => glint_math::Vec3::new(0.0, 1.0, -5.0),
        }
    }
}
