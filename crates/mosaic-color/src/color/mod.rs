//! Color types
//!
//! Only one color space is needed here: 8-bit sRGB triples as they come out
//! of an image decoder.

mod rgb;

pub use rgb::Rgb;
