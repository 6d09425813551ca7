//! Median-cut quantizer.
//!
//! Pixels start in a single box. The box with the largest
//! `channel range * population` is split on its widest channel at the
//! value boundary nearest its median, until the requested number of boxes
//! exists or no box can be split further. Each box then contributes the
//! exact (truncated) mean of its pixels.

use crate::color::Rgb;

/// Channel value above which a pixel counts as white for `ignore_white`.
const WHITE_THRESHOLD: u8 = 250;

/// Median-cut palette extractor.
///
/// # Example
///
/// ```
/// use mosaic_color::{MedianCut, Rgb};
///
/// let pixels = vec![Rgb::new(0, 0, 0); 8]
///     .into_iter()
///     .chain(vec![Rgb::new(255, 128, 0); 4])
///     .collect::<Vec<_>>();
///
/// let palette = MedianCut::new().quantize(&pixels, 5);
/// assert_eq!(palette, vec![Rgb::new(0, 0, 0), Rgb::new(255, 128, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedianCut {
    quality: usize,
    ignore_white: bool,
}

impl Default for MedianCut {
    fn default() -> Self {
        Self::new()
    }
}

impl MedianCut {
    /// Every pixel is considered and white is kept.
    pub fn new() -> Self {
        Self {
            quality: 1,
            ignore_white: false,
        }
    }

    /// Only consider every `quality`-th pixel. Zero is treated as 1.
    #[inline]
    pub fn quality(mut self, quality: usize) -> Self {
        self.quality = quality.max(1);
        self
    }

    /// Skip pixels whose channels all exceed 250.
    #[inline]
    pub fn ignore_white(mut self, ignore: bool) -> Self {
        self.ignore_white = ignore;
        self
    }

    /// Quantize `pixels` into at most `count` colors.
    ///
    /// Colors are ordered by how many sampled pixels they represent, most
    /// common first; equally common boxes keep their creation order. The
    /// result has no duplicates and is empty when nothing was sampled or
    /// `count` is zero.
    pub fn quantize(&self, pixels: &[Rgb], count: usize) -> Vec<Rgb> {
        if count == 0 {
            return Vec::new();
        }

        let samples: Vec<Rgb> = pixels
            .iter()
            .step_by(self.quality)
            .filter(|p| !(self.ignore_white && is_white(**p)))
            .copied()
            .collect();

        if samples.is_empty() {
            return Vec::new();
        }

        let mut boxes = vec![ColorBox::new(samples)];

        while boxes.len() < count {
            let Some(target) = pick_box(&boxes) else {
                break;
            };
            let high = boxes[target].split();
            boxes.push(high);
        }

        let mut ranked: Vec<(Rgb, usize)> = boxes.iter().map(|b| (b.mean(), b.len())).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut colors: Vec<Rgb> = Vec::with_capacity(ranked.len());
        for (color, _) in ranked {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors.truncate(count);
        colors
    }
}

#[inline]
fn is_white(p: Rgb) -> bool {
    p.r > WHITE_THRESHOLD && p.g > WHITE_THRESHOLD && p.b > WHITE_THRESHOLD
}

/// Index of the splittable box with the highest `range * population`.
fn pick_box(boxes: &[ColorBox]) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (i, b) in boxes.iter().enumerate() {
        let (_, range) = b.widest_channel();
        if range == 0 {
            continue;
        }
        let score = range as u64 * b.len() as u64;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Debug)]
struct ColorBox {
    pixels: Vec<Rgb>,
}

impl ColorBox {
    fn new(pixels: Vec<Rgb>) -> Self {
        Self { pixels }
    }

    fn len(&self) -> usize {
        self.pixels.len()
    }

    /// `(channel, max - min)` for the channel with the largest spread.
    fn widest_channel(&self) -> (usize, u8) {
        let mut best = (0, 0);
        for channel in 0..3 {
            let mut lo = u8::MAX;
            let mut hi = u8::MIN;
            for p in &self.pixels {
                let v = p.channel(channel);
                lo = lo.min(v);
                hi = hi.max(v);
            }
            let range = hi.saturating_sub(lo);
            if range > best.1 {
                best = (channel, range);
            }
        }
        best
    }

    /// Split in place, keeping the low half and returning the high half.
    ///
    /// Only called on boxes with a non-zero range, so a value boundary
    /// always exists and both halves are non-empty.
    fn split(&mut self) -> ColorBox {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|p| p.channel(channel));

        let cut = boundary_near_median(&self.pixels, channel);
        let high = self.pixels.split_off(cut);
        ColorBox::new(high)
    }

    fn mean(&self) -> Rgb {
        let n = self.pixels.len() as u64;
        let mut sum = [0u64; 3];
        for p in &self.pixels {
            sum[0] += p.r as u64;
            sum[1] += p.g as u64;
            sum[2] += p.b as u64;
        }
        Rgb::new((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8)
    }
}

/// Index `j` in `1..len` where `sorted[j-1] != sorted[j]` on `channel`,
/// closest to the median. Splitting there never separates equal values.
fn boundary_near_median(sorted: &[Rgb], channel: usize) -> usize {
    let len = sorted.len();
    let mid = (len / 2).max(1);
    let differs = |j: usize| sorted[j - 1].channel(channel) != sorted[j].channel(channel);

    let above = (mid..len).find(|&j| differs(j));
    let below = (1..mid).rev().find(|&j| differs(j));

    match (above, below) {
        (Some(a), Some(b)) => {
            if a - mid <= mid - b {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => mid,
    }
}
