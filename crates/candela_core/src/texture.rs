//! Texture loading and bilinear sampling.
//!
//! Textures are plain 8-bit RGB images; sampling returns normalized
//! `[0, 1]` colors. UV coordinates are expected pre-wrapped into `[0, 1)`
//! by the caller (the triangle interpolator takes fractional parts).

use std::path::Path;

use candela_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with 8-bit RGB pixel data, row-major from the top row.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Texture {
    /// Create a texture from raw pixel data.
    ///
    /// `pixels` is row-major with `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load a texture from an image file, converting to RGB.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Texture> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb.pixels().map(|p| p.0).collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);
        Ok(Self::new(width, height, pixels))
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texture at UV coordinates with bilinear filtering.
    ///
    /// `v` grows upward while rows are stored top-first, so the vertical
    /// axis flips. Returns normalized RGB in `[0, 1]`.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let x = u * (self.width - 1) as f32;
        let y = (1.0 - v) * (self.height - 1) as f32;

        let x0 = (x.floor() as i64).clamp(0, (self.width - 1) as i64) as u32;
        let y0 = (y.floor() as i64).clamp(0, (self.height - 1) as i64) as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let wx = x - x0 as f32;
        let wy = y - y0 as f32;

        let c00 = self.get_pixel(x0, y0);
        let c10 = self.get_pixel(x1, y0);
        let c01 = self.get_pixel(x0, y1);
        let c11 = self.get_pixel(x1, y1);

        let top = c00 * (1.0 - wx) + c10 * wx;
        let bottom = c01 * (1.0 - wx) + c11 * wx;

        top * (1.0 - wy) + bottom * wy
    }

    /// Get a pixel as normalized RGB.
    fn get_pixel(&self, x: u32, y: u32) -> Vec3 {
        let [r, g, b] = self.pixels[(y * self.width + x) as usize];
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 checker: top row red/green, bottom row blue/white.
    fn checker() -> Texture {
        Texture::new(
            2,
            2,
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
        )
    }

    #[test]
    fn test_sample_corners() {
        let tex = checker();

        // v=1 maps to the top row
        assert!(tex.sample(0.0, 1.0).abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
        assert!(tex.sample(1.0, 1.0).abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6));
        // v=0 maps to the bottom row
        assert!(tex.sample(0.0, 0.0).abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
        assert!(tex.sample(1.0, 0.0).abs_diff_eq(Vec3::ONE, 1e-6));
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let tex = checker();

        // Center of the texel grid blends all four pixels equally
        let c = tex.sample(0.5, 0.5);
        let expected = (Vec3::new(1.0, 0.0, 0.0)
            + Vec3::new(0.0, 1.0, 0.0)
            + Vec3::new(0.0, 0.0, 1.0)
            + Vec3::ONE)
            / 4.0;
        assert!(c.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_sample_single_pixel() {
        let tex = Texture::new(1, 1, vec![[128, 64, 32]]);
        let c = tex.sample(0.3, 0.8);
        assert!(c.abs_diff_eq(Vec3::new(128.0, 64.0, 32.0) / 255.0, 1e-6));
    }

    #[test]
    fn test_sample_in_unit_range() {
        let tex = checker();
        for &(u, v) in &[(0.0, 0.0), (0.25, 0.75), (0.99, 0.01)] {
            let c = tex.sample(u, v);
            for i in 0..3 {
                assert!((0.0..=1.0).contains(&c[i]));
            }
        }
    }
}
