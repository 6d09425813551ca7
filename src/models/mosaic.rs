use std::collections::BTreeMap;

use mosaic_color::Rgb;
use serde::Serialize;

use super::geometry::{Frame, Point3, Rectangle};
use super::grid_index::GridIndex;

/// Whether color data could be computed for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageStatus {
    /// The image decoded; colors were sampled from a `width × height` buffer.
    Loaded { width: u32, height: u32 },
    /// No image path was given.
    NotRequested,
    /// Decoding failed. Geometry is still present; colors are not.
    Unavailable { reason: String },
}

impl ImageStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageStatus::Loaded { .. })
    }
}

/// Output of one mosaic build.
///
/// All maps are keyed by [`GridIndex`] and iterate in column-major order.
/// `frames` and `rectangles` always cover the full grid; the color maps hold
/// only cells whose sampling succeeded, and `matched_colors` is empty when
/// the palette is.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicResult {
    pub(crate) columns: usize,
    pub(crate) rows: usize,
    pub(crate) cell_width: f64,
    pub(crate) cell_height: f64,
    pub(crate) base_frame: Frame,
    pub(crate) precision: u32,
    pub(crate) interval: Option<u32>,
    pub(crate) frames: BTreeMap<GridIndex, Frame>,
    pub(crate) rectangles: BTreeMap<GridIndex, Rectangle>,
    pub(crate) average_colors: BTreeMap<GridIndex, Rgb>,
    pub(crate) matched_colors: BTreeMap<GridIndex, Rgb>,
    pub(crate) palette: Vec<Rgb>,
    pub(crate) image_status: ImageStatus,
}

/// Everything known about one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView<'a> {
    pub index: GridIndex,
    pub frame: &'a Frame,
    pub rectangle: &'a Rectangle,
    pub average: Option<Rgb>,
    pub matched: Option<Rgb>,
}

impl MosaicResult {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn base_frame(&self) -> &Frame {
        &self.base_frame
    }

    /// Precision after clamping.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Sampling stride in pixels; `None` when nothing was sampled.
    pub fn interval(&self) -> Option<u32> {
        self.interval
    }

    pub fn frames(&self) -> &BTreeMap<GridIndex, Frame> {
        &self.frames
    }

    pub fn rectangles(&self) -> &BTreeMap<GridIndex, Rectangle> {
        &self.rectangles
    }

    pub fn average_colors(&self) -> &BTreeMap<GridIndex, Rgb> {
        &self.average_colors
    }

    pub fn matched_colors(&self) -> &BTreeMap<GridIndex, Rgb> {
        &self.matched_colors
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn image_status(&self) -> &ImageStatus {
        &self.image_status
    }

    pub fn cell_count(&self) -> usize {
        self.rectangles.len()
    }

    /// All cells in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellView<'_>> + '_ {
        self.rectangles.iter().filter_map(move |(index, rectangle)| {
            let frame = self.frames.get(index)?;
            Some(CellView {
                index: *index,
                frame,
                rectangle,
                average: self.average_colors.get(index).copied(),
                matched: self.matched_colors.get(index).copied(),
            })
        })
    }

    pub fn cell(&self, index: GridIndex) -> Option<CellView<'_>> {
        Some(CellView {
            index,
            frame: self.frames.get(&index)?,
            rectangle: self.rectangles.get(&index)?,
            average: self.average_colors.get(&index).copied(),
            matched: self.matched_colors.get(&index).copied(),
        })
    }

    pub fn to_report(&self) -> MosaicReport {
        MosaicReport {
            columns: self.columns,
            rows: self.rows,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            precision: self.precision,
            interval: self.interval,
            image: self.image_status.clone(),
            palette: self.palette.iter().map(|c| c.to_hex()).collect(),
            cells: self
                .cells()
                .map(|cell| CellReport {
                    column: cell.index.column,
                    row: cell.index.row,
                    origin: cell.frame.origin(),
                    corners: cell.rectangle.corners(),
                    average: cell.average.map(Rgb::to_hex),
                    matched: cell.matched.map(Rgb::to_hex),
                })
                .collect(),
        }
    }
}

/// Flat, serializable view of a [`MosaicResult`] with hex colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MosaicReport {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub precision: u32,
    pub interval: Option<u32>,
    pub image: ImageStatus,
    pub palette: Vec<String>,
    pub cells: Vec<CellReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellReport {
    pub column: usize,
    pub row: usize,
    pub origin: Point3,
    pub corners: [Point3; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl MosaicReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
