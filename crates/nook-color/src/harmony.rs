//! Hue-rotated harmony colors. Not used on the placement path.

use crate::rgb::Rgb;

/// Hue rotated by 180 degrees.
pub fn complementary(color: Rgb) -> Rgb {
    color.to_hsl().rotate(180.0).to_rgb()
}

/// The two colors at +120 and -120 degrees.
pub fn triad(color: Rgb) -> [Rgb; 2] {
    let hsl = color.to_hsl();
    [hsl.rotate(120.0).to_rgb(), hsl.rotate(-120.0).to_rgb()]
}

/// The two neighbours at `+degrees` and `-degrees`.
pub fn analogous(color: Rgb, degrees: f64) -> [Rgb; 2] {
    let hsl = color.to_hsl();
    [hsl.rotate(degrees).to_rgb(), hsl.rotate(-degrees).to_rgb()]
}
