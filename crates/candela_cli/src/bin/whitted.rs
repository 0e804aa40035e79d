//! Whitted-style recursive ray tracer over the sphere-grid scene.

use anyhow::Result;
use candela_cli::logger::{init_logger, LogLevel};
use candela_cli::output::save_image;
use candela_cli::{parse_args, scenes};
use candela_math::Vec3;
use candela_renderer::integrator::{whitted, RenderContext};
use candela_renderer::{render, Tonemap};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "whitted", about = "Whitted-style recursive ray tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1024)]
    height: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    max_bounces: u32,

    /// Output file path (.png or .ppm)
    #[arg(long, default_value = "whitted.png")]
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

    info!(
        "Whitted ray tracing: {}x{}, max bounces {}",
        args.width, args.height, args.max_bounces
    );

    let scene = scenes::whitted_scene(Vec3::ZERO);
    let bvh = scene.build_bvh();
    let ctx = RenderContext {
        bvh: &bvh,
        lights: &scene.lights,
        background: scene.background,
    };

    let film = render(args.width, args.height, 0, |x, y, _rng| {
        let ray = scene.camera.primary_ray(x, y, args.width, args.height);
        whitted::cast_ray(&ctx, &ray, 0, args.max_bounces)
    });

    save_image(&args.output, &film.to_bytes(Tonemap::Linear), args.width, args.height)?;
    info!("Image saved as {}", args.output);
    Ok(())
}
