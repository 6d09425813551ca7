pub mod grid;
pub mod image_loader;
pub mod mosaic_engine;
pub mod palette_extractor;

pub use grid::{generate, GridCell};
pub use image_loader::{FsImageDecoder, ImageDecoder};
pub use mosaic_engine::{cell_center, sampling_interval, MosaicEngine, MosaicRequest};
pub use palette_extractor::{
    ConfiguredExtractor, FixedPaletteExtractor, MedianCutExtractor, PaletteExtractor,
};
