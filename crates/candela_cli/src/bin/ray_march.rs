//! Volumetric single-scattering ray marcher.

use anyhow::Result;
use candela_cli::logger::{init_logger, LogLevel};
use candela_cli::output::save_image;
use candela_cli::{parse_args, scenes};
use candela_renderer::integrator::volumetric::{self, MarchDirection, VolumeSettings};
use candela_renderer::{render, Tonemap};
use clap::{Parser, ValueEnum};
use log::info;

/// March direction exposed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Direction {
    Forward,
    Backward,
}

impl From<Direction> for MarchDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => MarchDirection::Forward,
            Direction::Backward => MarchDirection::Backward,
        }
    }
}

#[derive(Parser)]
#[command(name = "ray-march", about = "Volumetric single-scattering ray marcher")]
struct Args {
    /// Image width in pixels
    #[arg(short, long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Absorption coefficient of the medium
    #[arg(short, long, default_value_t = 0.45)]
    sigma: f32,

    /// Number of ray-march steps
    #[arg(short = 'n', long, default_value_t = 10)]
    steps: u32,

    /// Compositing variant
    #[arg(long, value_enum, default_value_t = Direction::Backward)]
    direction: Direction,

    /// Output file path (.png or .ppm)
    #[arg(long, default_value = "ray_marching.png")]
    output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    debug_level: LogLevel,
}

fn main() -> Result<()> {
    let args: Args = parse_args();
    init_logger(args.debug_level.into());

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("width and height must be positive");
    }
    if args.sigma < 0.0 {
        anyhow::bail!("sigma must be non-negative");
    }
    if args.steps == 0 {
        anyhow::bail!("steps must be positive");
    }

    let direction: MarchDirection = args.direction.into();
    info!(
        "Ray marching ({:?}): {}x{}, sigma_a={}, steps={}",
        direction, args.width, args.height, args.sigma, args.steps
    );

    let (sphere, light, background) = scenes::volume_scene(direction);
    let camera = scenes::volume_camera();
    let settings = VolumeSettings {
        sigma_a: args.sigma,
        steps: args.steps,
        direction,
    };

    let film = render(args.width, args.height, 0, |x, y, _rng| {
        let ray = camera.primary_ray(x, y, args.width, args.height);
        volumetric::march(&sphere, &light, &ray, background, &settings)
    });

    save_image(&args.output, &film.to_bytes(Tonemap::Linear), args.width, args.height)?;
    info!("Image saved as {}", args.output);
    Ok(())
}
