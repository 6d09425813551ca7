#![allow(clippy::module_inception)]

//! mosaic-color: palettes for mosaic tiling
//!
//! This crate holds the color side of the mosaic pipeline. It has no
//! dependencies and knows nothing about images or geometry; it works on
//! flat slices of [`Rgb`] values.
//!
//! # Quick Start
//!
//! ```
//! use mosaic_color::{MedianCut, Palette, Rgb};
//!
//! let pixels = [
//!     Rgb::new(250, 10, 10),
//!     Rgb::new(250, 10, 10),
//!     Rgb::new(10, 10, 250),
//! ];
//! let colors = MedianCut::new().quantize(&pixels, 2);
//! let palette = Palette::new(&colors).unwrap();
//!
//! assert_eq!(palette.closest(Rgb::new(200, 0, 0)), Rgb::new(250, 10, 10));
//! ```
//!
//! # Distance Metric
//!
//! Matching uses plain squared Euclidean distance in 8-bit RGB:
//!
//! ```text
//! d = (r1 - r2)^2 + (g1 - g2)^2 + (b1 - b2)^2
//! ```
//!
//! No square root is taken since only the ordering matters. Ties resolve to
//! the entry listed first in the palette, so the result never depends on
//! sort stability.
//!
//! # Quantization
//!
//! [`MedianCut`] reduces a pixel set to at most `count` representative
//! colors. Each output color is the exact mean of the pixels that fell into
//! its box, so an image made of a handful of flat colors quantizes back to
//! exactly those colors.

pub mod color;
pub mod palette;
pub mod quantize;

pub use color::Rgb;
pub use palette::{closest, Palette, PaletteError, ParseColorError};
pub use quantize::MedianCut;
