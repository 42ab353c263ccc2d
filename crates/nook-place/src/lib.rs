//! Content-aware text placement.
//!
//! Given a [`Heatmap`](nook_heatmap::Heatmap), a text box size and a text
//! color, find the top-left position where the box sits over visually quiet
//! pixels that contrast well with the text, while staying clear of
//! rectangles already occupied on the canvas.
//!
//! The search is a scored walk over a coordinate grid, not a global
//! optimization. Each candidate is scored as
//!
//! ```text
//! alpha * (1 - mean saliency) + beta * contrast_ratio(background, text) / 21
//! ```
//!
//! where the mean saliency and mean background color come from the
//! heatmap's summed-area tables in constant time.
//!
//! # Example
//!
//! ```ignore
//! use nook_color::Rgb;
//! use nook_heatmap::{cache_key, HeatmapBuilder, HeatmapCache};
//! use nook_place::{PlacementKind, PlacementRequest, Rect};
//!
//! let cache = HeatmapCache::unbounded();
//! let builder = HeatmapBuilder::default();
//! let heatmap = cache.get_or_build(&cache_key("hero.jpg", 1600, 900), || {
//!     builder.build(&bytes, 1600, 900)
//! })?;
//!
//! let placement = PlacementRequest::new(&heatmap, 420.0, 96.0, Rgb::WHITE)
//!     .avoid(Rect::new(40.0, 40.0, 300.0, 80.0))
//!     .suggest();
//!
//! if placement.kind == PlacementKind::Placed {
//!     move_text_box(placement.x, placement.y);
//! }
//! ```

pub mod geometry;
pub mod request;
pub mod search;

pub use geometry::{AvoidRect, GridRect, Rect};
pub use request::{PlacementOptions, PlacementRequest};
pub use search::{
    suggest, suggest_sequence, Placement, PlacementKind, ScoreBreakdown, TextBox, MIN_BOX_CELLS,
    MIN_STEP,
};
