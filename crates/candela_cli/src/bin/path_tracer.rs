//! One-bounce MIS path tracer over the sphere-grid scene.

use anyhow::Result;
use candela_cli::logger::{init_logger, LogLevel};
use candela_cli::output::save_image;
use candela_cli::{parse_args, scenes};
use candela_renderer::integrator::path::{self, PathSettings};
use candela_renderer::integrator::RenderContext;
use candela_renderer::{render, Tonemap};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "path-tracer", about = "One-bounce path tracer with MIS")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1024)]
    height: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 2)]
    max_bounces: u32,

    /// Number of hemisphere samples per bounce
    #[arg(long, default_value_t = 100)]
    num_samples: u32,

    /// Seed of the per-pixel random streams
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (.png or .ppm)
    #[arg(long, default_value = "path_tracing.png")]
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
    if args.num_samples == 0 {
        anyhow::bail!("num-samples must be positive");
    }

    info!(
        "Path tracing: {}x{}, {} samples, max bounces {}",
        args.width, args.height, args.num_samples, args.max_bounces
    );

    let scene = scenes::path_scene();
    let bvh = scene.build_bvh();
    let ctx = RenderContext {
        bvh: &bvh,
        lights: &scene.lights,
        background: scene.background,
    };
    let settings = PathSettings {
        max_bounces: args.max_bounces,
        num_samples: args.num_samples,
    };

    let film = render(args.width, args.height, args.seed, |x, y, rng| {
        let ray = scene.camera.primary_ray(x, y, args.width, args.height);
        path::cast_ray(&ctx, &ray, 0, &settings, rng)
    });

    save_image(&args.output, &film.to_bytes(Tonemap::Linear), args.width, args.height)?;
    info!("Image saved as {}", args.output);
    Ok(())
}
