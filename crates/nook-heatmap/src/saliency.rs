//! Edge-magnitude saliency using the Sobel operator.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Magnitudes at or below this are treated as a flat image.
const FLAT_EPSILON: f32 = 1e-6;

/// Perceptual luma per pixel, weighted `(0.2126, 0.7152, 0.0722)`.
pub fn luma(pixels: &[[u8; 4]]) -> Vec<f32> {
    pixels
        .iter()
        .map(|p| 0.2126 * p[0] as f32 + 0.7152 * p[1] as f32 + 0.0722 * p[2] as f32)
        .collect()
}

/// Sobel gradient magnitude on a luma grid.
///
/// Border pixels lack a full 3x3 neighbourhood and stay at zero.
pub fn sobel_magnitude(luma: &[f32], width: u32, height: u32) -> Vec<f32> {
    let w = width as usize;
    let h = height as usize;
    let mut magnitudes = vec![0.0f32; w * h];

    if w < 3 || h < 3 {
        return magnitudes;
    }

    // Gx: [-1, 0, 1; -2, 0, 2; -1, 0, 1]
    // Gy: [-1, -2, -1; 0, 0, 0; 1, 2, 1]
    let fill_row = |(y, row): (usize, &mut [f32])| {
        if y == 0 || y == h - 1 {
            return;
        }
        let above = &luma[(y - 1) * w..y * w];
        let here = &luma[y * w..(y + 1) * w];
        let below = &luma[(y + 1) * w..(y + 2) * w];

        for x in 1..w - 1 {
            let gx = -above[x - 1] + above[x + 1] - 2.0 * here[x - 1] + 2.0 * here[x + 1]
                - below[x - 1]
                + below[x + 1];
            let gy = -above[x - 1] - 2.0 * above[x] - above[x + 1]
                + below[x - 1]
                + 2.0 * below[x]
                + below[x + 1];
            row[x] = (gx * gx + gy * gy).sqrt();
        }
    };

    #[cfg(feature = "parallel")]
    magnitudes.par_chunks_mut(w).enumerate().for_each(fill_row);

    #[cfg(not(feature = "parallel"))]
    magnitudes.chunks_mut(w).enumerate().for_each(fill_row);

    magnitudes
}

/// Scale values in place so the maximum becomes exactly 1.0.
///
/// A flat grid (maximum near zero) is left untouched.
pub fn normalize(values: &mut [f32]) {
    let max = values.iter().copied().fold(0.0f32, f32::max);
    if max <= FLAT_EPSILON {
        return;
    }
    for v in values.iter_mut() {
        *v /= max;
    }
}

/// Normalized saliency map in `[0, 1]` for an RGBA raster.
pub fn saliency_map(pixels: &[[u8; 4]], width: u32, height: u32) -> Vec<f32> {
    let luma = luma(pixels);
    let mut saliency = sobel_magnitude(&luma, width, height);
    normalize(&mut saliency);
    saliency
}
