//! Color conversions and contrast metrics.
//!
//! This crate is the leaf of the Nook workspace. It has no knowledge of
//! images or placement; it only knows how to move between hex strings, RGB
//! and HSL, and how to score two colors against each other using the WCAG
//! relative luminance and contrast ratio definitions.
//!
//! # Example
//!
//! ```
//! use nook_color::{contrast_ratio, Rgb};
//!
//! let white: Rgb = "#ffffff".parse().unwrap();
//! let black = Rgb::new(0, 0, 0);
//! assert!((contrast_ratio(white, black) - 21.0).abs() < 1e-9);
//! ```

pub mod contrast;
pub mod harmony;
pub mod rgb;

pub use contrast::{
    best_text_color, contrast_badges, contrast_ratio, relative_luminance, ContrastBadges, Tier,
    MAX_CONTRAST,
};
pub use harmony::{analogous, complementary, triad};
pub use rgb::{rgb_to_hex, Hsl, Rgb};

use thiserror::Error;

/// Errors produced while parsing colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {value:?}")]
    InvalidHex { value: String },
}
