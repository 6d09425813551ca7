use mosaic_color::{MedianCut, Rgb};

use crate::models::PixelBuffer;

/// Reduces an image to an ordered palette of at most `count` colors.
///
/// Returning fewer colors than requested is allowed, including none.
pub trait PaletteExtractor {
    fn extract(&self, buffer: &PixelBuffer, count: usize) -> Vec<Rgb>;
}

impl<F> PaletteExtractor for F
where
    F: Fn(&PixelBuffer, usize) -> Vec<Rgb>,
{
    fn extract(&self, buffer: &PixelBuffer, count: usize) -> Vec<Rgb> {
        self(buffer, count)
    }
}

/// Median-cut quantization over the image's pixels.
#[derive(Debug, Clone, Default)]
pub struct MedianCutExtractor {
    cut: MedianCut,
}

impl MedianCutExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only consider every `quality`-th pixel.
    pub fn quality(mut self, quality: usize) -> Self {
        self.cut = self.cut.quality(quality);
        self
    }

    pub fn ignore_white(mut self, ignore: bool) -> Self {
        self.cut = self.cut.ignore_white(ignore);
        self
    }
}

impl PaletteExtractor for MedianCutExtractor {
    fn extract(&self, buffer: &PixelBuffer, count: usize) -> Vec<Rgb> {
        self.cut.quantize(buffer.pixels(), count)
    }
}

/// A user-chosen palette; the image is not inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPaletteExtractor {
    colors: Vec<Rgb>,
}

impl FixedPaletteExtractor {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }
}

impl PaletteExtractor for FixedPaletteExtractor {
    fn extract(&self, _buffer: &PixelBuffer, count: usize) -> Vec<Rgb> {
        self.colors.iter().take(count).copied().collect()
    }
}

/// Either built-in extractor, chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredExtractor {
    MedianCut(MedianCutExtractor),
    Fixed(FixedPaletteExtractor),
}

impl PaletteExtractor for ConfiguredExtractor {
    fn extract(&self, buffer: &PixelBuffer, count: usize) -> Vec<Rgb> {
        match self {
            ConfiguredExtractor::MedianCut(e) => e.extract(buffer, count),
            ConfiguredExtractor::Fixed(e) => e.extract(buffer, count),
        }
    }
}
