//! Image file writers.
//!
//! Two output formats: binary PPM (P6) written directly, and anything the
//! `image` crate can encode (selected by extension, typically PNG).

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Save 8-bit RGB scanline bytes to `path`, picking the format from the
/// file extension.
pub fn save_image(path: &str, bytes: &[u8], width: u32, height: u32) -> Result<()> {
    if path.ends_with(".ppm") {
        save_ppm(path, bytes, width, height)
    } else {
        save_png(path, bytes, width, height)
    }
}

/// Write a binary PPM (P6) file: ASCII header, then raw RGB bytes.
fn save_ppm(path: &str, bytes: &[u8], width: u32, height: u32) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

fn save_png(path: &str, bytes: &[u8], width: u32, height: u32) -> Result<()> {
    image::save_buffer(path, bytes, width, height, image::ExtendedColorType::Rgb8)
        .with_context(|| format!("failed to write {}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_ppm_header_and_payload() {
        let dir = std::env::temp_dir();
        let path = dir.join("candela_output_test.ppm");
        let path = path.to_str().unwrap();

        let bytes = [10u8, 20, 30, 40, 50, 60];
        save_image(path, &bytes, 2, 1).unwrap();

        let mut written = Vec::new();
        File::open(path).unwrap().read_to_end(&mut written).unwrap();
        std::fs::remove_file(path).ok();

        assert!(written.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&written[written.len() - 6..], &bytes);
    }
}
