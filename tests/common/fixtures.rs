//! Test fixtures: colors and on-disk PNG images.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mosaic::Rgb;
use tempfile::TempDir;

/// Quadrant colors used by [`write_quadrant_png`].
pub mod colors {
    use super::Rgb;

    pub const CORAL: Rgb = Rgb::new(240, 96, 80);
    pub const NAVY: Rgb = Rgb::new(20, 30, 110);
}

/// Write an 8-bit RGB PNG from a pixel function.
pub fn write_png(path: &Path, width: u32, height: u32, pixel: impl Fn(u32, u32) -> Rgb) {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y).to_bytes());
        }
    }

    let file = File::create(path).expect("create fixture file");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("write PNG header");
    writer.write_image_data(&data).expect("write PNG data");
}

/// `size × size` image with CORAL in the top-left and bottom-right
/// quadrants and NAVY in the other two.
pub fn write_quadrant_png(dir: &TempDir, size: u32) -> PathBuf {
    let path = dir.path().join(format!("quadrants_{size}.png"));
    let half = size / 2;
    write_png(&path, size, size, |x, y| {
        if (x < half) == (y < half) {
            colors::CORAL
        } else {
            colors::NAVY
        }
    });
    path
}

/// Solid-color image.
pub fn write_solid_png(dir: &TempDir, width: u32, height: u32, color: Rgb) -> PathBuf {
    let path = dir.path().join(format!("solid_{width}x{height}.png"));
    write_png(&path, width, height, |_, _| color);
    path
}
