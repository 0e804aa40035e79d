//! Textured mesh renderer: OBJ geometry shaded with direct lighting and a
//! bilinearly sampled texture.

use anyhow::{Context, Result};
use candela_cli::logger::{init_logger, LogLevel};
use candela_cli::output::save_image;
use candela_cli::parse_args;
use candela_core::{ObjMesh, Texture};
use candela_math::Vec3;
use candela_renderer::integrator::{textured, RenderContext};
use candela_renderer::{render, Camera, Light, Material, Scene, Tonemap, Triangle};
use clap::Parser;
use log::{info, warn};

#[derive(Parser)]
#[command(name = "mesh-render", about = "Textured mesh renderer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1024)]
    height: u32,

    /// Path to the .obj mesh file
    #[arg(long, default_value = "models/barrel.obj")]
    mesh: String,

    /// Path to the texture image
    #[arg(long, default_value = "models/barrel.png")]
    texture: String,

    /// Expected texture width in pixels
    #[arg(long, default_value_t = 4096)]
    tex_width: u32,

    /// Expected texture height in pixels
    #[arg(long, default_value_t = 4096)]
    tex_height: u32,

    /// Output file path (.png or .ppm)
    #[arg(long, default_value = "rendering.png")]
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
        "Rendering {}x{} from {} with texture {}",
        args.width, args.height, args.mesh, args.texture
    );

    let mesh = ObjMesh::load(&args.mesh).with_context(|| format!("failed to load {}", args.mesh))?;
    if mesh.is_empty() {
        anyhow::bail!("{} contains no triangles", args.mesh);
    }

    let texture =
        Texture::load(&args.texture).with_context(|| format!("failed to load {}", args.texture))?;
    if texture.width() != args.tex_width || texture.height() != args.tex_height {
        warn!(
            "texture is {}x{}, expected {}x{}",
            texture.width(),
            texture.height(),
            args.tex_width,
            args.tex_height
        );
    }

    let material = Material {
        color: Vec3::new(1.0, 0.0, 0.0),
        ambient: 0.2,
        diffuse: 0.8,
        specular: 0.3,
        shininess: 16.0,
        ..Material::default()
    };

    let mut scene = Scene::new(Camera::new(Vec3::new(0.0, 0.5, 1.0), 90.0), Vec3::splat(0.1));
    for triangle in Triangle::from_vertex_data(mesh.vertex_data(), material) {
        scene.add(triangle);
    }
    scene.add_light(Light::new(Vec3::new(0.0, 0.75, 1.5), Vec3::ONE, 5.0));

    info!("Scene: {} triangles", mesh.triangle_count());

    let bvh = scene.build_bvh();
    let ctx = RenderContext {
        bvh: &bvh,
        lights: &scene.lights,
        background: scene.background,
    };

    let film = render(args.width, args.height, 0, |x, y, _rng| {
        let ray = scene.camera.primary_ray(x, y, args.width, args.height);
        textured::shade(&ctx, &ray, Some(&texture))
    });

    save_image(&args.output, &film.to_bytes(Tonemap::Srgb), args.width, args.height)?;
    info!("Image saved as {}", args.output);
    Ok(())
}
