//! Mosaic orchestration: grid, image, palette, per-cell colors.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mosaic_color::closest;

use crate::error::{ConfigError, DecodeError, GeometryError};
use crate::models::{clamp_precision, Frame, ImageStatus, MosaicConfig, MosaicResult, PixelBuffer};
use crate::rendering::sampler;
use crate::services::grid;
use crate::services::image_loader::{FsImageDecoder, ImageDecoder};
use crate::services::palette_extractor::{
    ConfiguredExtractor, FixedPaletteExtractor, MedianCutExtractor, PaletteExtractor,
};

/// Inputs for a single build.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicRequest {
    /// Image to sample; an empty path builds geometry only.
    pub image: PathBuf,
    pub base_frame: Frame,
    pub rows: usize,
    pub columns: usize,
    pub width: f64,
    pub height: f64,
    /// Clamped to 1..=10 by the engine.
    pub precision: i64,
    pub palette_size: usize,
}

impl Default for MosaicRequest {
    fn default() -> Self {
        Self::from_config(&MosaicConfig::default())
    }
}

impl MosaicRequest {
    /// Request on the world XY plane using the config's parameters.
    pub fn from_config(config: &MosaicConfig) -> Self {
        Self {
            image: config.image.clone(),
            base_frame: Frame::world_xy(),
            rows: config.rows,
            columns: config.columns,
            width: config.width,
            height: config.height,
            precision: config.precision,
            palette_size: config.palette_size,
        }
    }
}

/// Pixel stride for sampling a `columns × rows` grid over a
/// `buffer_width × buffer_height` image.
///
/// `floor(sqrt(area / cells) / precision)`, at least 1. `None` for an empty
/// grid, where nothing is sampled.
pub fn sampling_interval(
    buffer_width: u32,
    buffer_height: u32,
    columns: usize,
    rows: usize,
    precision: u32,
) -> Option<u32> {
    let cells = columns.checked_mul(rows).filter(|&n| n > 0)?;
    let area = buffer_width as f64 * buffer_height as f64;
    let interval = ((area / cells as f64).sqrt() / precision.max(1) as f64).floor();
    Some((interval as u32).max(1))
}

/// Pixel position of a cell's center: `extent / count * (index + 0.5)`,
/// truncated.
pub fn cell_center(extent: u32, count: usize, index: usize) -> i64 {
    (extent as f64 / count as f64 * (index as f64 + 0.5)) as i64
}

/// Builds [`MosaicResult`]s from requests.
///
/// Image decoding and palette extraction are pluggable; the defaults read
/// files with the `image` crate and quantize with median cut.
#[derive(Debug, Clone, Default)]
pub struct MosaicEngine<D = FsImageDecoder, E = MedianCutExtractor> {
    decoder: D,
    extractor: E,
}

impl MosaicEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MosaicEngine<FsImageDecoder, ConfiguredExtractor> {
    /// Engine whose extractor honours the config's `palette`, `quality`
    /// and `ignore_white` settings.
    pub fn from_config(config: &MosaicConfig) -> Result<Self, ConfigError> {
        let extractor = match config.fixed_palette()? {
            Some(colors) => ConfiguredExtractor::Fixed(FixedPaletteExtractor::new(colors)),
            None => ConfiguredExtractor::MedianCut(
                MedianCutExtractor::new()
                    .quality(config.quality)
                    .ignore_white(config.ignore_white),
            ),
        };
        Ok(Self::with_components(FsImageDecoder, extractor))
    }
}

impl<D: ImageDecoder, E: PaletteExtractor> MosaicEngine<D, E> {
    pub fn with_components(decoder: D, extractor: E) -> Self {
        Self { decoder, extractor }
    }

    /// Build the mosaic for `request`.
    ///
    /// Geometry is always produced. If the image cannot be loaded the
    /// result carries no colors and an [`ImageStatus`] saying why. Cells
    /// whose sampling window misses the image get no colors; with an empty
    /// palette only average colors are filled in.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidDimension`] for a non-positive cell size.
    pub fn build(&self, request: &MosaicRequest) -> Result<MosaicResult, GeometryError> {
        let precision = clamp_precision(request.precision);
        let cells = grid::generate(
            &request.base_frame,
            request.width,
            request.height,
            request.columns,
            request.rows,
        )?;

        let mut result = MosaicResult {
            columns: request.columns,
            rows: request.rows,
            cell_width: request.width,
            cell_height: request.height,
            base_frame: request.base_frame,
            precision,
            interval: None,
            frames: cells.iter().map(|(idx, cell)| (*idx, cell.frame)).collect(),
            rectangles: cells
                .iter()
                .map(|(idx, cell)| (*idx, cell.rectangle))
                .collect(),
            average_colors: BTreeMap::new(),
            matched_colors: BTreeMap::new(),
            palette: Vec::new(),
            image_status: ImageStatus::NotRequested,
        };

        let buffer = match self.decoder.decode(&request.image) {
            Ok(buffer) => buffer,
            Err(DecodeError::EmptyPath) => {
                tracing::debug!("No image given, building geometry only");
                return Ok(result);
            }
            Err(e) => {
                tracing::warn!(
                    path = %request.image.display(),
                    %e,
                    "Failed to load image, building geometry only"
                );
                result.image_status = ImageStatus::Unavailable {
                    reason: e.to_string(),
                };
                return Ok(result);
            }
        };

        result.image_status = ImageStatus::Loaded {
            width: buffer.width(),
            height: buffer.height(),
        };
        result.palette = self.extractor.extract(&buffer, request.palette_size);
        if result.palette.is_empty() {
            tracing::debug!("Palette extraction returned no colors, skipping matching");
        }

        result.interval = sampling_interval(
            buffer.width(),
            buffer.height(),
            request.columns,
            request.rows,
            precision,
        );
        if let Some(interval) = result.interval {
            self.sample_cells(&mut result, &buffer, interval);
        }

        tracing::info!(
            cells = result.cell_count(),
            colored = result.average_colors.len(),
            palette = result.palette.len(),
            interval = ?result.interval,
            "Built mosaic"
        );

        Ok(result)
    }

    fn sample_cells(&self, result: &mut MosaicResult, buffer: &PixelBuffer, interval: u32) {
        let cell_px_width = buffer.width() / result.columns as u32;
        let cell_px_height = buffer.height() / result.rows as u32;

        for index in result.rectangles.keys() {
            let x = cell_center(buffer.width(), result.columns, index.column);
            let y = cell_center(buffer.height(), result.rows, index.row);

            let average =
                match sampler::average(buffer, x, y, cell_px_width, cell_px_height, interval) {
                    Ok(color) => color,
                    Err(e) => {
                        tracing::debug!(cell = %index, %e, "Skipping cell");
                        continue;
                    }
                };

            result.average_colors.insert(*index, average);
            if let Ok(matched) = closest(&result.palette, average) {
                result.matched_colors.insert(*index, matched);
            }
        }
    }
}
