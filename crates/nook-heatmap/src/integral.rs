//! Summed-area tables.
//!
//! A table over a `width x height` grid has `(width + 1) x (height + 1)`
//! cells. Cell `(x, y)` holds the sum of every source value with column
//! `< x` and row `< y`, so row 0 and column 0 are always zero and the sum
//! over any axis-aligned rectangle is four lookups.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Summed-area table over a dense 2D grid.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl IntegralImage {
    /// Build a table from a row-major slice of `width * height` values.
    pub fn from_values(values: &[f32], width: u32, height: u32) -> Self {
        debug_assert_eq!(values.len(), width as usize * height as usize);
        Self::from_fn(width, height, |idx| values[idx] as f64)
    }

    /// Build a table where `value(idx)` yields the source value at
    /// row-major index `idx`.
    ///
    /// Each row is prefix-summed left to right, then rows are accumulated
    /// top to bottom. The row pass is independent per row and may run in
    /// parallel without changing the result.
    pub fn from_fn<F>(width: u32, height: u32, value: F) -> Self
    where
        F: Fn(usize) -> f64 + Sync,
    {
        let w = width as usize;
        let h = height as usize;
        let stride = w + 1;
        let mut data = vec![0.0f64; stride * (h + 1)];

        let fill_row = |(y, row): (usize, &mut [f64])| {
            let src = y * w;
            let mut acc = 0.0;
            for x in 0..w {
                acc += value(src + x);
                row[x + 1] = acc;
            }
        };

        #[cfg(feature = "parallel")]
        data[stride..]
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(fill_row);

        #[cfg(not(feature = "parallel"))]
        data[stride..].chunks_mut(stride).enumerate().for_each(fill_row);

        for y in 2..=h {
            let (above, rest) = data.split_at_mut(y * stride);
            let prev = &above[(y - 1) * stride..];
            for (cell, up) in rest[..stride].iter_mut().zip(prev).skip(1) {
                *cell += *up;
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Width of the source grid.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source grid.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw table cell at `(x, y)`, with `x <= width` and `y <= height`.
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Sum over the half-open rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// Coordinates are clamped to the grid; an empty rectangle sums to 0.
    pub fn sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0.0;
        }
        self.get(x1, y1) - self.get(x0, y1) - self.get(x1, y0) + self.get(x0, y0)
    }

    /// Mean over the `w x h` rectangle at `(x, y)`.
    pub fn mean(&self, x: u32, y: u32, w: u32, h: u32) -> f64 {
        let area = w as f64 * h as f64;
        if area <= 0.0 {
            return 0.0;
        }
        self.sum(x, y, x.saturating_add(w), y.saturating_add(h)) / area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_sum(values: &[f32], width: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
        let mut sum = 0.0;
        for y in y0..y1 {
            for x in x0..x1 {
                sum += values[(y * width + x) as usize] as f64;
            }
        }
        sum
    }

    #[test]
    fn test_zero_border() {
        let values = vec![1.0f32; 12];
        let table = IntegralImage::from_values(&values, 4, 3);
        for x in 0..=4 {
            assert_eq!(table.get(x, 0), 0.0);
        }
        for y in 0..=3 {
            assert_eq!(table.get(0, y), 0.0);
        }
        assert_eq!(table.get(4, 3), 12.0);
    }

    #[test]
    fn test_small_grid() {
        // 1 2 3
        // 4 5 6
        let values = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let table = IntegralImage::from_values(&values, 3, 2);
        assert_eq!(table.get(1, 1), 1.0);
        assert_eq!(table.get(3, 1), 6.0);
        assert_eq!(table.get(2, 2), 12.0);
        assert_eq!(table.sum(1, 0, 3, 2), 16.0);
        assert_eq!(table.sum(1, 1, 2, 2), 5.0);
        assert_eq!(table.mean(0, 0, 3, 2), 3.5);
    }

    #[test]
    fn test_empty_rect() {
        let values = [1.0f32; 4];
        let table = IntegralImage::from_values(&values, 2, 2);
        assert_eq!(table.sum(1, 1, 1, 2), 0.0);
        assert_eq!(table.sum(2, 0, 1, 2), 0.0);
        assert_eq!(table.mean(0, 0, 0, 0), 0.0);
    }

    #[test]
    fn test_sum_clamps_to_grid() {
        let values = [1.0f32; 4];
        let table = IntegralImage::from_values(&values, 2, 2);
        assert_eq!(table.sum(0, 0, 10, 10), 4.0);
    }

    fn grid() -> impl Strategy<Value = (u32, u32, Vec<f32>)> {
        (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec(0.0f32..1.0, (w * h) as usize),
            )
        })
    }

    proptest! {
        #[test]
        fn rect_sum_matches_brute_force(
            (w, h, values) in grid(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
            c in any::<prop::sample::Index>(),
            d in any::<prop::sample::Index>(),
        ) {
            let table = IntegralImage::from_values(&values, w, h);
            let (xa, xb) = (a.index(w as usize + 1) as u32, b.index(w as usize + 1) as u32);
            let (ya, yb) = (c.index(h as usize + 1) as u32, d.index(h as usize + 1) as u32);
            let (x0, x1) = (xa.min(xb), xa.max(xb));
            let (y0, y1) = (ya.min(yb), ya.max(yb));

            let fast = table.sum(x0, y0, x1, y1);
            let slow = brute_sum(&values, w, x0, y0, x1, y1);
            prop_assert!((fast - slow).abs() < 1e-9, "fast {} slow {}", fast, slow);
        }

        #[test]
        fn byte_channel_sums_are_exact(
            (w, h, values) in (1u32..16, 1u32..16).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), prop::collection::vec(any::<u8>(), (w * h) as usize))
            })
        ) {
            let table = IntegralImage::from_fn(w, h, |i| values[i] as f64);
            let total: u64 = values.iter().map(|&v| v as u64).sum();
            prop_assert_eq!(table.sum(0, 0, w, h), total as f64);
        }
    }
}
