//! Saliency heatmaps for content-aware text placement.
//!
//! A [`Heatmap`] is an immutable snapshot of one image at a fixed downscale.
//! It carries a normalized edge-magnitude (saliency) grid plus four
//! summed-area tables, one over saliency and one per color channel, so that
//! the mean saliency or mean color of any axis-aligned rectangle costs four
//! lookups.
//!
//! # Pipeline Overview
//!
//! 1. **Downscale**: cap the working width (384 px by default)
//! 2. **Rasterize**: decode and resize to RGBA samples
//! 3. **Color tables**: red, green and blue summed-area tables
//! 4. **Saliency**: Sobel magnitude over luma, normalized to `[0, 1]`
//! 5. **Saliency table**: summed-area table over the normalized grid
//!
//! Heatmaps are usually obtained through a [`HeatmapCache`], which builds
//! each (source, width, height) triple once.
//!
//! # Example
//!
//! ```ignore
//! use nook_heatmap::{cache_key, HeatmapBuilder, HeatmapCache};
//!
//! let cache = HeatmapCache::unbounded();
//! let builder = HeatmapBuilder::default();
//! let bytes = std::fs::read("photo.jpg")?;
//! let key = cache_key("photo.jpg", 1200, 800);
//! let heatmap = cache.get_or_build(&key, || builder.build(&bytes, 1200, 800))?;
//! ```

pub mod builder;
pub mod cache;
pub mod integral;
pub mod saliency;

pub use builder::{build, HeatmapBuilder};
pub use cache::{cache_key, HeatmapCache};
pub use integral::IntegralImage;

use thiserror::Error;

/// Default ceiling for the working raster width.
pub const DEFAULT_MAX_WIDTH: u32 = 384;

/// Errors that can occur while building a heatmap.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatmapError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
}

/// Configuration for heatmap construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct HeatmapConfig {
    /// Maximum width of the downscaled raster. Narrower images keep their
    /// original width.
    pub max_width: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
        }
    }
}

/// Downscaled saliency and color tables for one image.
///
/// Never mutated after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Heatmap {
    width: u32,
    height: u32,
    scale: f64,
    saliency: Vec<f32>,
    saliency_table: IntegralImage,
    red_table: IntegralImage,
    green_table: IntegralImage,
    blue_table: IntegralImage,
}

impl Heatmap {
    /// Build from an already rasterized RGBA buffer of `width * height`
    /// pixels. `scale` relates this raster to the original image
    /// (`downscaled = original * scale`). Alpha is ignored.
    pub fn from_rgba(
        pixels: &[[u8; 4]],
        width: u32,
        height: u32,
        scale: f64,
    ) -> Result<Self, HeatmapError> {
        if width == 0 || height == 0 {
            return Err(HeatmapError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(HeatmapError::InvalidScale(scale));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(HeatmapError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }

        let red_table = IntegralImage::from_fn(width, height, |i| pixels[i][0] as f64);
        let green_table = IntegralImage::from_fn(width, height, |i| pixels[i][1] as f64);
        let blue_table = IntegralImage::from_fn(width, height, |i| pixels[i][2] as f64);

        let saliency = saliency::saliency_map(pixels, width, height);
        let saliency_table = IntegralImage::from_values(&saliency, width, height);

        Ok(Self {
            width,
            height,
            scale,
            saliency,
            saliency_table,
            red_table,
            green_table,
            blue_table,
        })
    }

    /// Width of the downscaled raster.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the downscaled raster.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Downscale factor relative to the original image, in `(0, 1]`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Normalized saliency grid, row-major.
    pub fn saliency(&self) -> &[f32] {
        &self.saliency
    }

    /// Saliency at `(x, y)`, or 0 outside the raster.
    pub fn saliency_at(&self, x: u32, y: u32) -> f32 {
        if x < self.width && y < self.height {
            self.saliency[(y * self.width + x) as usize]
        } else {
            0.0
        }
    }

    pub fn saliency_table(&self) -> &IntegralImage {
        &self.saliency_table
    }

    /// Per-channel tables in red, green, blue order.
    pub fn color_tables(&self) -> [&IntegralImage; 3] {
        [&self.red_table, &self.green_table, &self.blue_table]
    }

    /// Mean saliency over the `w x h` rectangle at `(x, y)`, heatmap pixels.
    pub fn mean_saliency(&self, x: u32, y: u32, w: u32, h: u32) -> f64 {
        self.saliency_table.mean(x, y, w, h)
    }

    /// Mean `[r, g, b]` over the `w x h` rectangle at `(x, y)`, heatmap pixels.
    pub fn mean_rgb(&self, x: u32, y: u32, w: u32, h: u32) -> [f64; 3] {
        [
            self.red_table.mean(x, y, w, h),
            self.green_table.mean(x, y, w, h),
            self.blue_table.mean(x, y, w, h),
        ]
    }
}
