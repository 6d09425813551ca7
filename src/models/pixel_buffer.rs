use mosaic_color::Rgb;

use crate::error::DecodeError;

/// Immutable row-major image: `width * height` contiguous [`Rgb`] pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// # Errors
    ///
    /// [`DecodeError::BufferSize`] if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, DecodeError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(DecodeError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() % 3 != 0 {
            return Err(DecodeError::BufferSize {
                expected: width as usize * height as usize,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A buffer of one uniform color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside `[0, width) × [0, height)`.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }
}

impl From<image::RgbImage> for PixelBuffer {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgb::from_bytes(p.0)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let result = PixelBuffer::new(2, 2, vec![Rgb::default(); 3]);
        assert!(matches!(
            result,
            Err(DecodeError::BufferSize {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_get_row_major_and_bounds() {
        let pixels = (0..6u8).map(|v| Rgb::new(v, 0, 0)).collect();
        let buffer = PixelBuffer::new(3, 2, pixels).unwrap();

        assert_eq!(buffer.get(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(buffer.get(2, 0), Some(Rgb::new(2, 0, 0)));
        assert_eq!(buffer.get(0, 1), Some(Rgb::new(3, 0, 0)));
        assert_eq!(buffer.get(2, 1), Some(Rgb::new(5, 0, 0)));
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.get(0, 2), None);
        assert_eq!(buffer.get(-1, 0), None);
    }

    #[test]
    fn test_from_rgb8() {
        let buffer = PixelBuffer::from_rgb8(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buffer.pixels(), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);

        assert!(PixelBuffer::from_rgb8(2, 1, &[1, 2, 3, 4]).is_err());
        assert!(PixelBuffer::from_rgb8(2, 2, &[1, 2, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_from_rgb_image() {
        let img = image::RgbImage::from_fn(2, 2, |x, y| image::Rgb([x as u8, y as u8, 9]));
        let buffer = PixelBuffer::from(img);

        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.get(1, 0), Some(Rgb::new(1, 0, 9)));
        assert_eq!(buffer.get(0, 1), Some(Rgb::new(0, 1, 9)));
    }

    #[test]
    fn test_zero_area() {
        let buffer = PixelBuffer::filled(0, 5, Rgb::new(1, 1, 1));
        assert_eq!(buffer.area(), 0);
        assert!(buffer.pixels().is_empty());
        assert_eq!(buffer.get(0, 0), None);
    }
}
