//! Flat raster preview of a mosaic.
//!
//! Cells are drawn in grid coordinates: column 0 on the left, row 0 at the
//! bottom, each tile `cell_width × cell_height` units scaled by
//! `pixels_per_unit`. The base frame's placement in space is ignored.

use std::collections::BTreeMap;
use std::io::Cursor;

use mosaic_color::Rgb;

use crate::error::RenderError;
use crate::models::{GridIndex, MosaicResult};

/// Fill for cells that have no color.
pub const EMPTY_CELL: Rgb = Rgb::new(128, 128, 128);

/// Largest preview edge in pixels.
pub const MAX_PREVIEW_EDGE: u64 = 16_384;

/// Which per-cell color to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSource {
    #[default]
    Average,
    Matched,
}

/// A rasterized preview, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

/// Rasterize `result` at `pixels_per_unit`.
///
/// # Errors
///
/// [`RenderError::EmptyGrid`] if the grid has no cells, or
/// [`RenderError::TooLarge`] if either edge would exceed
/// [`MAX_PREVIEW_EDGE`] (or round to zero).
pub fn render_preview(
    result: &MosaicResult,
    pixels_per_unit: f64,
    source: ColorSource,
) -> Result<PreviewImage, RenderError> {
    if result.cell_count() == 0 {
        return Err(RenderError::EmptyGrid);
    }

    let raw_width = (result.columns() as f64 * result.cell_width() * pixels_per_unit).round();
    let raw_height = (result.rows() as f64 * result.cell_height() * pixels_per_unit).round();
    let in_range = |v: f64| v.is_finite() && (1.0..=MAX_PREVIEW_EDGE as f64).contains(&v);
    if !in_range(raw_width) || !in_range(raw_height) {
        return Err(RenderError::TooLarge {
            width: raw_width.max(0.0) as u64,
            height: raw_height.max(0.0) as u64,
        });
    }
    let (width, height) = (raw_width as u32, raw_height as u32);

    let colors: &BTreeMap<GridIndex, Rgb> = match source {
        ColorSource::Average => result.average_colors(),
        ColorSource::Matched => result.matched_colors(),
    };

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for py in 0..height {
        // Flip so row 0 is at the bottom.
        let gy = (height - 1 - py) as f64 + 0.5;
        let row = ((gy / height as f64) * result.rows() as f64) as usize;
        for px in 0..width {
            let gx = px as f64 + 0.5;
            let column = ((gx / width as f64) * result.columns() as f64) as usize;
            let index = GridIndex::new(
                column.min(result.columns() - 1),
                row.min(result.rows() - 1),
            );
            pixels.push(colors.get(&index).copied().unwrap_or(EMPTY_CELL));
        }
    }

    Ok(PreviewImage {
        width,
        height,
        pixels,
    })
}

/// Encode a preview as PNG.
///
/// Previews with at most 256 distinct colors (always the case for matched
/// colors) are written as indexed PNG with a PLTE chunk; others as 8-bit RGB.
pub fn encode_png(image: &PreviewImage) -> Result<Vec<u8>, RenderError> {
    let mut plte: Vec<Rgb> = Vec::new();
    let mut indices: Vec<u8> = Vec::with_capacity(image.pixels.len());
    let mut lookup: BTreeMap<Rgb, u8> = BTreeMap::new();

    for &p in &image.pixels {
        if let Some(&idx) = lookup.get(&p) {
            indices.push(idx);
            continue;
        }
        if plte.len() == 256 {
            break;
        }
        let idx = plte.len() as u8;
        lookup.insert(p, idx);
        plte.push(p);
        indices.push(idx);
    }

    if indices.len() == image.pixels.len() {
        let plte_bytes: Vec<u8> = plte.iter().flat_map(|c| c.to_bytes()).collect();
        write_png(image, png::ColorType::Indexed, Some(&plte_bytes), &indices)
    } else {
        let rgb: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_bytes()).collect();
        write_png(image, png::ColorType::Rgb, None, &rgb)
    }
}

fn write_png(
    image: &PreviewImage,
    color_type: png::ColorType,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width, image.height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
