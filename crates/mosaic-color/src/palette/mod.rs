//! Palette types and nearest-color matching
//!
//! This module provides the ordered [`Palette`] type, the free-standing
//! [`closest`] matcher, and the error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{closest, Palette};
