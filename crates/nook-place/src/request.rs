//! Placement requests and their tunable options.

use nook_color::Rgb;
use nook_heatmap::Heatmap;

use crate::geometry::{AvoidRect, Rect};
use crate::search::{suggest, Placement};

/// Scoring weights and spacing for a placement search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PlacementOptions {
    /// Weight of visual quiet, `1 - mean saliency`.
    pub alpha: f64,

    /// Weight of normalized contrast against the text color.
    pub beta: f64,

    /// Distance kept from the image border, original-image pixels.
    pub margin: f64,

    /// Padding applied to avoid rectangles added without their own,
    /// original-image pixels.
    pub avoid_padding: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            beta: 0.4,
            margin: 8.0,
            avoid_padding: 4.0,
        }
    }
}

/// Everything one search needs.
///
/// ```ignore
/// let placement = PlacementRequest::new(&heatmap, 100.0, 40.0, Rgb::WHITE)
///     .margin(12.0)
///     .avoid(Rect::new(0.0, 0.0, 200.0, 80.0))
///     .suggest();
/// ```
#[derive(Debug, Clone)]
pub struct PlacementRequest<'a> {
    pub heatmap: &'a Heatmap,
    /// Target box width, original-image pixels.
    pub box_width: f64,
    /// Target box height, original-image pixels.
    pub box_height: f64,
    pub text_color: Rgb,
    pub options: PlacementOptions,
    pub avoid: Vec<AvoidRect>,
}

impl<'a> PlacementRequest<'a> {
    /// A request with default options and nothing to avoid.
    pub fn new(heatmap: &'a Heatmap, box_width: f64, box_height: f64, text_color: Rgb) -> Self {
        Self {
            heatmap,
            box_width,
            box_height,
            text_color,
            options: PlacementOptions::default(),
            avoid: Vec::new(),
        }
    }

    /// Replace all options. Avoid rectangles already added keep their padding.
    pub fn options(mut self, options: PlacementOptions) -> Self {
        self.options = options;
        self
    }

    pub fn weights(mut self, alpha: f64, beta: f64) -> Self {
        self.options.alpha = alpha;
        self.options.beta = beta;
        self
    }

    pub fn margin(mut self, margin: f64) -> Self {
        self.options.margin = margin;
        self
    }

    /// Avoid `rect`, padded by the request's `avoid_padding`.
    pub fn avoid(mut self, rect: Rect) -> Self {
        let padding = self.options.avoid_padding;
        self.avoid.push(AvoidRect::new(rect, padding));
        self
    }

    /// Avoid a rectangle that carries its own padding.
    pub fn avoid_padded(mut self, avoid: AvoidRect) -> Self {
        self.avoid.push(avoid);
        self
    }

    /// Avoid every rectangle in `rects`, padded by `avoid_padding`.
    pub fn avoid_all<I>(mut self, rects: I) -> Self
    where
        I: IntoIterator<Item = Rect>,
    {
        let padding = self.options.avoid_padding;
        self.avoid
            .extend(rects.into_iter().map(|rect| AvoidRect::new(rect, padding)));
        self
    }

    /// Run the search.
    pub fn suggest(&self) -> Placement {
        suggest(self)
    }
}
