//! Ordered palette with first-match-wins nearest-color lookup.

use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Return the palette entry closest to `query` by squared RGB distance.
///
/// When several entries are equally close, the one listed first wins. This
/// is a linear scan with a strict `<` comparison, so the outcome never
/// depends on how a sort would order equal keys.
///
/// # Errors
///
/// Returns [`PaletteError::EmptyPalette`] if `palette` has no entries.
///
/// # Example
///
/// ```
/// use mosaic_color::{closest, Rgb};
///
/// let palette = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
/// assert_eq!(closest(&palette, Rgb::new(200, 200, 200)), Ok(Rgb::new(255, 255, 255)));
/// ```
pub fn closest(palette: &[Rgb], query: Rgb) -> Result<Rgb, PaletteError> {
    nearest_index(palette, query)
        .map(|(idx, _)| palette[idx])
        .ok_or(PaletteError::EmptyPalette)
}

fn nearest_index(colors: &[Rgb], query: Rgb) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;

    for (i, &candidate) in colors.iter().enumerate() {
        let dist = query.distance_squared(candidate);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }

    best
}

/// A non-empty, ordered color palette.
///
/// Order is significant: it decides ties in [`Palette::find_nearest`]. The
/// palette does not reorder or deduplicate its input.
///
/// # Example
///
/// ```
/// use mosaic_color::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an ordered list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"#F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first invalid entry,
    /// or [`PaletteError::EmptyPalette`] if `hex` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use mosaic_color::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#F00"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .enumerate()
            .map(|(index, s)| {
                Rgb::from_str(s.as_ref()).map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at the given index.
    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Find the nearest palette entry to `color`.
    ///
    /// Returns `(index, squared_distance)`. Equidistant entries resolve to
    /// the lowest index.
    pub fn find_nearest(&self, color: Rgb) -> (usize, u32) {
        // Linear scan; palettes here are a handful of entries.
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// The palette color nearest to `color`.
    #[inline]
    pub fn closest(&self, color: Rgb) -> Rgb {
        self.colors[self.find_nearest(color).0]
    }

    /// Consume the palette, returning its colors.
    pub fn into_colors(self) -> Vec<Rgb> {
        self.colors
    }
}
