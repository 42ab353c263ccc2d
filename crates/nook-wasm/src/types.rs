//! JavaScript-facing request and result shapes.

use nook_color::{ColorError, ContrastBadges, Rgb};
use nook_heatmap::HeatmapError;
use nook_place::{AvoidRect, Placement, PlacementKind, PlacementOptions, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to JavaScript.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Heatmap(#[from] HeatmapError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Avoid rectangle from JavaScript. `padding` falls back to the request's
/// `avoidPadding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidRectJs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub padding: Option<f64>,
}

/// Placement request from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequestJs {
    pub box_width: f64,
    pub box_height: f64,
    /// Hex text color, `#rrggbb` or `#rgb`.
    pub text_color: String,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub margin: Option<f64>,
    #[serde(default)]
    pub avoid_padding: Option<f64>,
    #[serde(default)]
    pub avoid: Vec<AvoidRectJs>,
}

impl SuggestRequestJs {
    pub fn options(&self) -> PlacementOptions {
        let mut opts = PlacementOptions::default();
        if let Some(alpha) = self.alpha {
            opts.alpha = alpha;
        }
        if let Some(beta) = self.beta {
            opts.beta = beta;
        }
        if let Some(margin) = self.margin {
            opts.margin = margin;
        }
        if let Some(padding) = self.avoid_padding {
            opts.avoid_padding = padding;
        }
        opts
    }

    pub fn text_color(&self) -> Result<Rgb, ColorError> {
        self.text_color.parse()
    }

    pub fn avoid_rects(&self, default_padding: f64) -> Vec<AvoidRect> {
        self.avoid
            .iter()
            .map(|a| {
                AvoidRect::new(
                    Rect::new(a.x, a.y, a.width, a.height),
                    a.padding.unwrap_or(default_padding),
                )
            })
            .collect()
    }
}

/// Placement result for JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementJs {
    pub x: u32,
    pub y: u32,
    pub score: f64,
    pub kind: PlacementKind,
    /// Mean background color under the box, when placed.
    pub background: Option<String>,
    pub contrast_ratio: Option<f64>,
    pub mean_saliency: Option<f64>,
}

impl From<Placement> for PlacementJs {
    fn from(p: Placement) -> Self {
        Self {
            x: p.x,
            y: p.y,
            score: p.score,
            kind: p.kind,
            background: p.breakdown.map(|b| b.background.to_hex()),
            contrast_ratio: p.breakdown.map(|b| b.contrast_ratio),
            mean_saliency: p.breakdown.map(|b| b.mean_saliency),
        }
    }
}

/// Contrast badges for JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgesJs {
    pub ratio: f64,
    pub labels: Vec<String>,
}

impl From<ContrastBadges> for BadgesJs {
    fn from(badges: ContrastBadges) -> Self {
        Self {
            ratio: badges.ratio(),
            labels: badges.labels().into_iter().map(String::from).collect(),
        }
    }
}

/// Convert JavaScript dimensions to whole pixels, rejecting zero, negative
/// and non-finite values.
pub fn pixel_dimensions(width: f64, height: f64) -> Result<(u32, u32), HeatmapError> {
    let valid = |v: f64| v.is_finite() && v.round() >= 1.0 && v <= u32::MAX as f64;
    if !valid(width) || !valid(height) {
        return Err(HeatmapError::InvalidDimensions {
            width: saturating_i64(width),
            height: saturating_i64(height),
        });
    }
    Ok((width.round() as u32, height.round() as u32))
}

fn saturating_i64(v: f64) -> i64 {
    if v.is_nan() {
        0
    } else {
        v as i64
    }
}
