//! Mosaic - grid tiling with sampled colors
//!
//! Lays a rectangular grid of tiles over a plane, samples an average color
//! per tile from an image, extracts a reduced palette and snaps each
//! average to its nearest palette entry.
//! This library exposes modules for the CLI and integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use mosaic_color::{closest, MedianCut, Palette, PaletteError, Rgb};
