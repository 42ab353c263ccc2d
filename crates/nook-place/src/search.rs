//! Grid search for the quietest, most readable spot.

use nook_color::{contrast_ratio, Rgb, MAX_CONTRAST};
use nook_heatmap::Heatmap;
use tracing::{debug, trace};

use crate::geometry::{AvoidRect, GridRect, Rect};
use crate::request::{PlacementOptions, PlacementRequest};

/// Smallest box side searched, heatmap pixels.
pub const MIN_BOX_CELLS: u32 = 6;

/// Smallest grid step, heatmap pixels.
pub const MIN_STEP: u32 = 4;

/// How a placement was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PlacementKind {
    /// Best candidate of the grid.
    Placed,
    /// The box does not fit inside the heatmap; nothing was searched.
    Fallback,
    /// Every candidate was rejected by an avoid rectangle or the margins.
    NoCandidate,
}

/// Components of a winning score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScoreBreakdown {
    /// Mean saliency under the box, `[0, 1]`.
    pub mean_saliency: f64,
    /// Mean color under the box.
    pub background: Rgb,
    /// Contrast ratio of the text color against `background`.
    pub contrast_ratio: f64,
}

/// Suggested top-left corner in original-image pixels.
///
/// `score` is the raw objective and only comparable within one search.
/// It is 0 for [`PlacementKind::Fallback`] and negative infinity for
/// [`PlacementKind::NoCandidate`]; both report the margin corner.
///
/// Coordinates are whole pixels: a heatmap cell `c` maps back to
/// `round(c / scale)`, the margin corner included. At scale 0.32 a margin
/// of 3 cells reports 9, not 9.375.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub score: f64,
    pub kind: PlacementKind,
    pub breakdown: Option<ScoreBreakdown>,
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        self.kind == PlacementKind::Placed
    }

    /// The placed box as a rectangle in original-image pixels.
    pub fn rect(&self, box_width: f64, box_height: f64) -> Rect {
        Rect::new(self.x as f64, self.y as f64, box_width, box_height)
    }
}

/// One text box for [`suggest_sequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBox {
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

struct Candidate {
    x: u32,
    y: u32,
    score: f64,
    breakdown: Option<ScoreBreakdown>,
}

/// Search the heatmap for the best top-left position of the request's box.
///
/// Candidates lie on a regular grid inside the margins, visited row by row
/// (y ascending, then x ascending). A candidate replaces the running best
/// only when its score is strictly greater, so the first of equal scores
/// wins and the result is deterministic.
pub fn suggest(request: &PlacementRequest<'_>) -> Placement {
    let heatmap = request.heatmap;
    let options = &request.options;
    let scale = heatmap.scale();
    let (grid_w, grid_h) = (heatmap.width(), heatmap.height());

    let margin = to_cells(options.margin, scale);
    let box_w = to_cells(request.box_width, scale).max(MIN_BOX_CELLS);
    let box_h = to_cells(request.box_height, scale).max(MIN_BOX_CELLS);
    let corner = to_original(margin, scale);

    if box_w >= grid_w || box_h >= grid_h {
        debug!(box_w, box_h, grid_w, grid_h, "text box does not fit heatmap");
        return Placement {
            x: corner,
            y: corner,
            score: 0.0,
            kind: PlacementKind::Fallback,
            breakdown: None,
        };
    }

    let step = (box_w.min(box_h) / 3).max(MIN_STEP) as usize;
    let blocked: Vec<GridRect> = request
        .avoid
        .iter()
        .map(|avoid| avoid.to_grid(scale, grid_w, grid_h))
        .collect();

    let mut best = Candidate {
        x: margin,
        y: margin,
        score: f64::NEG_INFINITY,
        breakdown: None,
    };
    let mut evaluated = 0usize;

    if let (Some(max_x), Some(max_y)) = (
        grid_w.checked_sub(margin.saturating_add(box_w)),
        grid_h.checked_sub(margin.saturating_add(box_h)),
    ) {
        for y in (margin..=max_y).step_by(step) {
            for x in (margin..=max_x).step_by(step) {
                let cell = GridRect::from_origin(x, y, box_w, box_h);
                if blocked.iter().any(|b| b.overlaps(&cell)) {
                    continue;
                }

                evaluated += 1;
                let (score, breakdown) =
                    score_cell(heatmap, x, y, box_w, box_h, request.text_color, options);
                if score > best.score {
                    best = Candidate {
                        x,
                        y,
                        score,
                        breakdown: Some(breakdown),
                    };
                }
            }
        }
    }

    if best.breakdown.is_none() {
        debug!(avoid = blocked.len(), "no placement candidate survived");
        return Placement {
            x: corner,
            y: corner,
            score: f64::NEG_INFINITY,
            kind: PlacementKind::NoCandidate,
            breakdown: None,
        };
    }

    trace!(
        x = best.x,
        y = best.y,
        score = best.score,
        evaluated,
        step,
        "placement found"
    );

    Placement {
        x: to_original(best.x, scale),
        y: to_original(best.y, scale),
        score: best.score,
        kind: PlacementKind::Placed,
        breakdown: best.breakdown,
    }
}

/// Place several boxes in order. Each box that is placed becomes an avoid
/// rectangle (padded by `options.avoid_padding`) for the boxes after it.
pub fn suggest_sequence(
    heatmap: &Heatmap,
    boxes: &[TextBox],
    options: &PlacementOptions,
    avoid: &[AvoidRect],
) -> Vec<Placement> {
    let mut occupied = avoid.to_vec();
    let mut placements = Vec::with_capacity(boxes.len());

    for text_box in boxes {
        let request = PlacementRequest {
            heatmap,
            box_width: text_box.width,
            box_height: text_box.height,
            text_color: text_box.color,
            options: options.clone(),
            avoid: occupied.clone(),
        };
        let placement = suggest(&request);

        if placement.is_placed() {
            occupied.push(AvoidRect::new(
                placement.rect(text_box.width, text_box.height),
                options.avoid_padding,
            ));
        }
        placements.push(placement);
    }

    placements
}

/// `alpha * (1 - mean saliency) + beta * contrast / 21`.
fn score_cell(
    heatmap: &Heatmap,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    text: Rgb,
    options: &PlacementOptions,
) -> (f64, ScoreBreakdown) {
    let mean_saliency = heatmap.mean_saliency(x, y, w, h);
    let [r, g, b] = heatmap.mean_rgb(x, y, w, h);
    let background = Rgb::from_f64(r, g, b);
    let ratio = contrast_ratio(background, text);
    let contrast = (ratio / MAX_CONTRAST).clamp(0.0, 1.0);

    let score = options.alpha * (1.0 - mean_saliency) + options.beta * contrast;
    (
        score,
        ScoreBreakdown {
            mean_saliency,
            background,
            contrast_ratio: ratio,
        },
    )
}

/// Original-image length to whole heatmap pixels.
fn to_cells(value: f64, scale: f64) -> u32 {
    let cells = (value * scale).round();
    if cells.is_nan() || cells <= 0.0 {
        0
    } else {
        cells.min(u32::MAX as f64) as u32
    }
}

/// Heatmap coordinate to original-image pixels.
fn to_original(cells: u32, scale: f64) -> u32 {
    (cells as f64 / scale).round() as u32
}
