//! WCAG relative luminance, contrast ratio and accessibility badges.

use crate::rgb::Rgb;

/// Largest possible contrast ratio (black on white).
pub const MAX_CONTRAST: f64 = 21.0;

const AAA_NORMAL: f64 = 7.0;
const AA_NORMAL: f64 = 4.5;
const AA_LARGE: f64 = 3.0;

/// Relative luminance in `[0, 1]`, weighted `(0.2126, 0.7152, 0.0722)`.
pub fn relative_luminance(color: Rgb) -> f64 {
    let r = srgb_to_linear(color.r as f64 / 255.0);
    let g = srgb_to_linear(color.g as f64 / 255.0);
    let b = srgb_to_linear(color.b as f64 / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio in `[1, 21]`. Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (high, low) = if la >= lb { (la, lb) } else { (lb, la) };
    (high + 0.05) / (low + 0.05)
}

/// WCAG conformance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Aa,
    Aaa,
}

/// Accessibility tiers reached by a text/background pair, split by text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContrastBadges {
    pub ratio_x100: u32,
    pub normal: Option<Tier>,
    pub large: Option<Tier>,
}

impl ContrastBadges {
    /// Classify a contrast ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        let (normal, large) = if ratio >= AAA_NORMAL {
            (Some(Tier::Aaa), Some(Tier::Aaa))
        } else if ratio >= AA_NORMAL {
            (Some(Tier::Aa), Some(Tier::Aaa))
        } else if ratio >= AA_LARGE {
            (None, Some(Tier::Aa))
        } else {
            (None, None)
        };

        Self {
            ratio_x100: (ratio * 100.0).round() as u32,
            normal,
            large,
        }
    }

    /// Display labels, normal-size tier first.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::with_capacity(2);
        match self.normal {
            Some(Tier::Aaa) => labels.push("AAA"),
            Some(Tier::Aa) => labels.push("AA"),
            None => {}
        }
        match self.large {
            Some(Tier::Aaa) => labels.push("AAA Large"),
            Some(Tier::Aa) => labels.push("AA Large"),
            None => {}
        }
        labels
    }

    /// Contrast ratio rounded to two decimals.
    pub fn ratio(&self) -> f64 {
        self.ratio_x100 as f64 / 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.normal.is_none() && self.large.is_none()
    }
}

/// Badges for text drawn over a background.
pub fn contrast_badges(background: Rgb, text: Rgb) -> ContrastBadges {
    ContrastBadges::from_ratio(contrast_ratio(background, text))
}

/// The candidate with the highest contrast against `background`.
/// The first candidate wins ties. Returns `None` for an empty slice.
pub fn best_text_color(background: Rgb, candidates: &[Rgb]) -> Option<Rgb> {
    let mut best: Option<(Rgb, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(background, candidate);
        match best {
            Some((_, best_ratio)) if ratio <= best_ratio => {}
            _ => best = Some((candidate, ratio)),
        }
    }
    best.map(|(color, _)| color)
}

/// Convert sRGB component to linear RGB.
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
