//! Palette extraction by color quantization
//!
//! Reduces an arbitrary set of pixels to a small ordered list of
//! representative colors.

mod median_cut;

pub use median_cut::MedianCut;
