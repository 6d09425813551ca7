use std::path::PathBuf;

use mosaic_color::PaletteError;
use thiserror::Error;

/// Caller errors in grid or frame construction. Always fatal to the call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid dimension: {width}x{height} (width and height must be positive)")]
    InvalidDimension { width: f64, height: f64 },

    #[error("Invalid frame: axes must be non-zero and not parallel")]
    InvalidFrame,
}

/// Image loading failures. The engine recovers from these by producing
/// geometry without colors.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("No image path given")]
    EmptyPath,

    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer size mismatch: expected {expected} pixels, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Per-cell sampling failure. The engine omits the cell's colors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("No in-bounds samples for cell centered at ({center_x}, {center_y})")]
    NoSamples { center_x: i64, center_y: i64 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to render: the grid has no cells")]
    EmptyGrid,

    #[error("Preview too large: {width}x{height} pixels")]
    TooLarge { width: u64, height: u64 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid palette in config: {0}")]
    Palette(#[from] PaletteError),
}
