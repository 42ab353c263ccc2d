//! Rectangles in image space and heatmap space.
//!
//! [`Rect`] and [`AvoidRect`] are in original-image pixels. [`GridRect`] is
//! in heatmap pixels. The two are related by the heatmap scale and only
//! meet through [`AvoidRect::to_grid`].

/// Axis-aligned rectangle in original-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Grow by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Check if two rectangles overlap (touching edges do not count).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A region placements must stay clear of, padded on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvoidRect {
    pub rect: Rect,
    pub padding: f64,
}

impl AvoidRect {
    pub fn new(rect: Rect, padding: f64) -> Self {
        Self { rect, padding }
    }

    /// The padded rectangle in heatmap pixels, clamped to a
    /// `grid_width x grid_height` raster. Edges round outwards.
    pub fn to_grid(&self, scale: f64, grid_width: u32, grid_height: u32) -> GridRect {
        let padded = self.rect.inflate(self.padding.max(0.0));
        let to_cell = |v: f64, limit: u32| -> u32 {
            if v.is_nan() {
                return 0;
            }
            v.clamp(0.0, limit as f64) as u32
        };

        GridRect {
            x0: to_cell((padded.x * scale).floor(), grid_width),
            y0: to_cell((padded.y * scale).floor(), grid_height),
            x1: to_cell((padded.right() * scale).ceil(), grid_width),
            y1: to_cell((padded.bottom() * scale).ceil(), grid_height),
        }
    }
}

/// Half-open rectangle `[x0, x1) x [y0, y1)` in heatmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl GridRect {
    pub fn from_origin(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Half-open interval overlap on both axes.
    pub fn overlaps(&self, other: &GridRect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_grid_overlap_is_half_open() {
        let a = GridRect::from_origin(0, 0, 10, 10);
        assert!(a.overlaps(&GridRect::from_origin(9, 9, 2, 2)));
        assert!(!a.overlaps(&GridRect::from_origin(10, 0, 5, 5)));
        assert!(!a.overlaps(&GridRect::from_origin(0, 10, 5, 5)));
        // Empty rectangles overlap nothing.
        assert!(!a.overlaps(&GridRect::from_origin(5, 5, 0, 3)));
    }

    #[test]
    fn test_avoid_to_grid_scales_and_pads() {
        let avoid = AvoidRect::new(Rect::new(100.0, 50.0, 40.0, 20.0), 4.0);
        let grid = avoid.to_grid(0.5, 1000, 1000);
        assert_eq!(grid, GridRect { x0: 48, y0: 23, x1: 72, y1: 37 });
    }

    #[test]
    fn test_avoid_to_grid_clamps() {
        let avoid = AvoidRect::new(Rect::new(-50.0, -50.0, 1000.0, 1000.0), 4.0);
        let grid = avoid.to_grid(1.0, 200, 100);
        assert_eq!(grid, GridRect { x0: 0, y0: 0, x1: 200, y1: 100 });
    }

    #[test]
    fn test_avoid_to_grid_rounds_outwards() {
        let avoid = AvoidRect::new(Rect::new(10.0, 10.0, 11.0, 11.0), 0.0);
        let grid = avoid.to_grid(0.25, 100, 100);
        assert_eq!(grid, GridRect { x0: 2, y0: 2, x1: 6, y1: 6 });
    }
}
