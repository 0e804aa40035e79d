//! Framebuffer and tile-parallel render driver.
//!
//! The image is split into square tiles rendered in parallel with rayon.
//! Every pixel draws its randomness from its own deterministically seeded
//! stream, so the output is identical regardless of how tiles are
//! scheduled across threads.

use candela_math::Vec3;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Default tile edge length in pixels.
pub const TILE_SIZE: u32 = 64;

/// Byte conversion applied when resolving the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tonemap {
    /// Clamp to [0, 1] and scale to 255.
    Linear,
    /// Clamp, then apply gamma 1/2.2 before scaling.
    Srgb,
}

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Split an image into tiles of at most `tile_size` per side.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    let mut tiles = Vec::new();
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            tiles.push(Tile {
                x,
                y,
                width: tile_size.min(width - x),
                height: tile_size.min(height - y),
            });
            x += tile_size;
        }
        y += tile_size;
    }
    tiles
}

/// Row-major HDR framebuffer.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Film {
    /// Create a black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Resolve to 8-bit RGB bytes in scanline order, top row first.
    pub fn to_bytes(&self, tonemap: Tonemap) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            for channel in 0..3 {
                let mut value = pixel[channel].clamp(0.0, 1.0);
                if tonemap == Tonemap::Srgb {
                    value = value.powf(1.0 / 2.2);
                }
                bytes.push((value * 255.0).round() as u8);
            }
        }
        bytes
    }
}

/// A deterministic per-pixel random stream.
fn pixel_rng(seed: u64, x: u32, y: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ (((y as u64) << 32) | x as u64))
}

/// Render an image by evaluating `shade` for every pixel.
///
/// Tiles are distributed over the rayon thread pool; the shader receives
/// the pixel coordinates and that pixel's private random stream.
pub fn render<F>(width: u32, height: u32, seed: u64, shade: F) -> Film
where
    F: Fn(u32, u32, &mut ChaCha8Rng) -> Vec3 + Sync,
{
    let tiles = generate_tiles(width, height, TILE_SIZE);

    log::info!(
        "Rendering {}x{} ({} tiles) on {} threads",
        width,
        height,
        tiles.len(),
        rayon::current_num_threads()
    );

    let progress = ProgressBar::new(tiles.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {pos}/{len} tiles ETA: {eta}")
            .expect("static template"),
    );

    let shaded: Vec<(Tile, Vec<Vec3>)> = tiles
        .par_iter()
        .map(|&tile| {
            let mut pixels = Vec::with_capacity((tile.width * tile.height) as usize);
            for local_y in 0..tile.height {
                for local_x in 0..tile.width {
                    let x = tile.x + local_x;
                    let y = tile.y + local_y;
                    let mut rng = pixel_rng(seed, x, y);
                    pixels.push(shade(x, y, &mut rng));
                }
            }
            progress.inc(1);
            (tile, pixels)
        })
        .collect();

    progress.finish_and_clear();

    let mut film = Film::new(width, height);
    for (tile, pixels) in shaded {
        let mut index = 0;
        for local_y in 0..tile.height {
            for local_x in 0..tile.width {
                film.set(tile.x + local_x, tile.y + local_y, pixels[index]);
                index += 1;
            }
        }
    }
    film
}
