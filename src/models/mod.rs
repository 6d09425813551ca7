pub mod config;
pub mod geometry;
pub mod grid_index;
pub mod mosaic;
pub mod pixel_buffer;

pub use config::{clamp_precision, MosaicConfig, PRECISION_RANGE};
pub use geometry::{Frame, Point3, Rectangle, Vector3};
pub use grid_index::GridIndex;
pub use mosaic::{CellReport, CellView, ImageStatus, MosaicReport, MosaicResult};
pub use pixel_buffer::PixelBuffer;
