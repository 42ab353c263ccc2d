//! Decoding and downscaling images into heatmaps.

use image::imageops::{self, FilterType};
use image::DynamicImage;
use tracing::debug;

use crate::{Heatmap, HeatmapConfig, HeatmapError};

/// Builds [`Heatmap`]s from encoded or decoded images.
#[derive(Debug, Clone, Default)]
pub struct HeatmapBuilder {
    config: HeatmapConfig,
}

/// Working raster size for an original image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl HeatmapBuilder {
    pub fn new(config: HeatmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Choose the downscaled raster size for an original image.
    ///
    /// The width is capped at `max_width`; the height follows the same
    /// scale, rounded, and both are floored at 1.
    pub fn target_size(
        &self,
        original_width: u32,
        original_height: u32,
    ) -> Result<TargetSize, HeatmapError> {
        if original_width == 0 || original_height == 0 {
            return Err(HeatmapError::InvalidDimensions {
                width: original_width as i64,
                height: original_height as i64,
            });
        }

        let width = self.config.max_width.min(original_width).max(1);
        let scale = width as f64 / original_width as f64;
        let height = ((original_height as f64 * scale).round() as u32).max(1);

        Ok(TargetSize {
            width,
            height,
            scale,
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF, WebP) and build a heatmap.
    pub fn build(
        &self,
        bytes: &[u8],
        original_width: u32,
        original_height: u32,
    ) -> Result<Heatmap, HeatmapError> {
        // Validate before paying for the decode.
        self.target_size(original_width, original_height)?;

        let img = image::load_from_memory(bytes)
            .map_err(|e| HeatmapError::Decode(e.to_string()))?;

        self.build_from_image(&img, original_width, original_height)
    }

    /// Build a heatmap from a decoded image.
    ///
    /// The image is resampled to the target size regardless of its own
    /// dimensions; `original_width`/`original_height` define the coordinate
    /// space placements are reported in.
    pub fn build_from_image(
        &self,
        img: &DynamicImage,
        original_width: u32,
        original_height: u32,
    ) -> Result<Heatmap, HeatmapError> {
        let target = self.target_size(original_width, original_height)?;

        if img.width() == 0 || img.height() == 0 {
            return Err(HeatmapError::Decode("decoded image is empty".to_string()));
        }

        let rgba = img.to_rgba8();
        let raster = if rgba.dimensions() == (target.width, target.height) {
            rgba
        } else {
            imageops::resize(&rgba, target.width, target.height, FilterType::Triangle)
        };

        let pixels: Vec<[u8; 4]> = raster.pixels().map(|p| p.0).collect();

        debug!(
            original_width,
            original_height,
            width = target.width,
            height = target.height,
            scale = target.scale,
            "building heatmap"
        );

        Heatmap::from_rgba(&pixels, target.width, target.height, target.scale)
    }
}

/// Build a heatmap with the default configuration.
pub fn build(
    bytes: &[u8],
    original_width: u32,
    original_height: u32,
) -> Result<Heatmap, HeatmapError> {
    HeatmapBuilder::default().build(bytes, original_width, original_height)
}
