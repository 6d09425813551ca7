use std::path::Path;

use crate::error::DecodeError;
use crate::models::PixelBuffer;

/// Turns an image reference into pixels.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&Path) -> Result<PixelBuffer, DecodeError>,
{
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError> {
        self(path)
    }
}

/// Decodes image files with the `image` crate. Any supported format is
/// accepted; alpha is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageDecoder;

impl ImageDecoder for FsImageDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, DecodeError> {
        if path.as_os_str().is_empty() {
            return Err(DecodeError::EmptyPath);
        }
        if !path.is_file() {
            return Err(DecodeError::NotFound(path.to_path_buf()));
        }

        let img = image::open(path)?;
        tracing::debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "Decoded image"
        );
        Ok(PixelBuffer::from(img.to_rgb8()))
    }
}
