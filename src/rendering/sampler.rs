//! Per-cell average color by sub-sampling a pixel buffer.
//!
//! The sampling window is `cell_width × cell_height` pixels around the cell
//! center, walked on a grid whose stride is the sampling interval. Samples
//! outside the buffer are dropped rather than clamped to the border, so edge
//! cells are averaged over fewer pixels instead of being biased toward
//! repeated border values.

use mosaic_color::Rgb;

use crate::error::SampleError;
use crate::models::PixelBuffer;

/// Average color of the cell centered at `(center_x, center_y)`.
///
/// The window spans `center - size/2` up to but excluding
/// `center - size/2 + size` on each axis (at least one pixel wide). The
/// stride on each axis is `min(interval, size/2)`, raised to 1 if that is 0.
/// Each channel of the result is the truncated mean over all in-bounds
/// samples.
///
/// # Errors
///
/// [`SampleError::NoSamples`] if no sample falls inside the buffer.
pub fn average(
    buffer: &PixelBuffer,
    center_x: i64,
    center_y: i64,
    cell_width: u32,
    cell_height: u32,
    interval: u32,
) -> Result<Rgb, SampleError> {
    let (x_start, x_end, x_step) = axis_walk(center_x, cell_width, interval);
    let (y_start, y_end, y_step) = axis_walk(center_y, cell_height, interval);

    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for y in (y_start..y_end).step_by(y_step) {
        for x in (x_start..x_end).step_by(x_step) {
            let Some(p) = buffer.get(x, y) else {
                continue;
            };
            sum[0] += p.r as u64;
            sum[1] += p.g as u64;
            sum[2] += p.b as u64;
            count += 1;
        }
    }

    if count == 0 {
        return Err(SampleError::NoSamples { center_x, center_y });
    }

    Ok(Rgb::new(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    ))
}

/// `(start, end_exclusive, step)` along one axis.
fn axis_walk(center: i64, size: u32, interval: u32) -> (i64, i64, usize) {
    let half = size / 2;
    let step = interval.min(half).max(1) as usize;
    let start = center - half as i64;
    let end = start + size.max(1) as i64;
    (start, end, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| Rgb::new(x as u8, y as u8, 100)))
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_uniform_buffer_any_interval() {
        let c = Rgb::new(33, 144, 250);
        let buffer = PixelBuffer::filled(40, 30, c);
        for interval in [1, 2, 3, 7, 50, u32::MAX] {
            assert_eq!(average(&buffer, 20, 15, 40, 30, interval), Ok(c));
        }
    }

    #[test]
    fn test_zero_interval_treated_as_one() {
        let buffer = gradient(4, 4);
        assert_eq!(
            average(&buffer, 2, 2, 4, 4, 0),
            average(&buffer, 2, 2, 4, 4, 1)
        );
    }

    #[test]
    fn test_mean_is_truncated() {
        // x in {0, 1}: mean red = 0.5 -> 0; y in {0, 1}: mean green = 0.5 -> 0
        let buffer = gradient(2, 2);
        assert_eq!(average(&buffer, 1, 1, 2, 2, 1), Ok(Rgb::new(0, 0, 100)));

        let pixels = vec![Rgb::new(10, 0, 0), Rgb::new(11, 0, 0), Rgb::new(11, 0, 0)];
        let buffer = PixelBuffer::new(3, 1, pixels).unwrap();
        // 32 / 3 = 10.67 -> 10
        assert_eq!(average(&buffer, 1, 0, 3, 1, 1), Ok(Rgb::new(10, 0, 0)));
    }

    #[test]
    fn test_window_is_half_open() {
        // Cell [0, 2) x [0, 2) must not pick up column 2 or row 2.
        let buffer = gradient(4, 4);
        // x in {0, 1} -> 0.5 -> 0; y likewise
        assert_eq!(average(&buffer, 1, 1, 2, 2, 1), Ok(Rgb::new(0, 0, 100)));
        // x in {2, 3} -> 2.5 -> 2; y in {2, 3} -> 2
        assert_eq!(average(&buffer, 3, 3, 2, 2, 1), Ok(Rgb::new(2, 2, 100)));
    }

    #[test]
    fn test_interval_strides_samples() {
        // 8 wide, cell covers x in [0, 8); interval 4 -> x in {0, 4}
        let buffer = gradient(8, 1);
        assert_eq!(average(&buffer, 4, 0, 8, 1, 4), Ok(Rgb::new(2, 0, 100)));
        // interval above half the cell is capped at width/2 = 4
        assert_eq!(average(&buffer, 4, 0, 8, 1, 100), Ok(Rgb::new(2, 0, 100)));
        // interval 3 -> x in {0, 3, 6} -> 3
        assert_eq!(average(&buffer, 4, 0, 8, 1, 3), Ok(Rgb::new(3, 0, 100)));
    }

    #[test]
    fn test_out_of_bounds_samples_dropped() {
        // Window x in [-2, 2) only sees columns 0 and 1.
        let buffer = gradient(4, 1);
        assert_eq!(average(&buffer, 0, 0, 4, 1, 1), Ok(Rgb::new(0, 0, 100)));
        // Window x in [2, 6) only sees columns 2 and 3.
        assert_eq!(average(&buffer, 4, 0, 4, 1, 1), Ok(Rgb::new(2, 0, 100)));
    }

    #[test]
    fn test_cell_entirely_outside() {
        let buffer = gradient(4, 4);
        assert_eq!(
            average(&buffer, 100, 1, 4, 4, 1),
            Err(SampleError::NoSamples {
                center_x: 100,
                center_y: 1
            })
        );
        assert!(average(&buffer, 1, -10, 2, 2, 1).is_err());
    }

    #[test]
    fn test_zero_area_buffer() {
        let buffer = PixelBuffer::filled(0, 0, Rgb::default());
        assert!(matches!(
            average(&buffer, 0, 0, 0, 0, 1),
            Err(SampleError::NoSamples { .. })
        ));
    }

    #[test]
    fn test_zero_size_cell_samples_center() {
        let buffer = gradient(4, 4);
        assert_eq!(average(&buffer, 3, 1, 0, 0, 5), Ok(Rgb::new(3, 1, 100)));
    }
}
