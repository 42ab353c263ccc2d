//! WebAssembly bindings for the Nook placement engine.
//!
//! ## Example
//!
//! ```js
//! import { NookEngine, contrastBadges } from 'nook';
//!
//! const engine = new NookEngine();
//! const bytes = new Uint8Array(await (await fetch(url)).arrayBuffer());
//!
//! const placement = engine.suggestPlacement(url, bytes, img.naturalWidth, img.naturalHeight, {
//!   boxWidth: 320,
//!   boxHeight: 64,
//!   textColor: '#ffffff',
//!   avoid: otherTextBoxes,
//! });
//!
//! if (placement.kind === 'placed') {
//!   textBox.set({ left: placement.x, top: placement.y });
//! }
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;

use nook_color::Rgb;
use nook_heatmap::{Heatmap, HeatmapBuilder, HeatmapCache, HeatmapConfig};
use nook_place::{Placement, PlacementRequest};
use wasm_bindgen::prelude::*;

mod types;

pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Placement engine with its own heatmap cache.
#[wasm_bindgen]
pub struct NookEngine {
    cache: HeatmapCache,
    builder: HeatmapBuilder,
}

#[wasm_bindgen]
impl NookEngine {
    /// Create an engine with an unbounded cache.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            cache: HeatmapCache::unbounded(),
            builder: HeatmapBuilder::default(),
        }
    }

    /// Create an engine keeping at most `capacity` heatmaps.
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(capacity: usize, max_width: Option<u32>) -> Self {
        let cache = match NonZeroUsize::new(capacity) {
            Some(capacity) => HeatmapCache::new(capacity),
            None => HeatmapCache::unbounded(),
        };
        let mut config = HeatmapConfig::default();
        if let Some(max_width) = max_width {
            config.max_width = max_width;
        }
        Self {
            cache,
            builder: HeatmapBuilder::new(config),
        }
    }

    /// Suggest a position for a text box over an image.
    ///
    /// `source` identifies the image for caching (typically its URL);
    /// `bytes` are only decoded on a cache miss.
    #[wasm_bindgen(js_name = suggestPlacement)]
    pub fn suggest_placement(
        &self,
        source: &str,
        bytes: &[u8],
        original_width: f64,
        original_height: f64,
        request: JsValue,
    ) -> Result<JsValue, JsError> {
        let request: SuggestRequestJs = serde_wasm_bindgen::from_value(request)
            .map_err(|e| JsError::new(&format!("Invalid request: {}", e)))?;

        let placement = self
            .suggest(source, bytes, original_width, original_height, &request)
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&PlacementJs::from(placement))
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Number of cached heatmaps.
    #[wasm_bindgen(js_name = cacheSize)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached heatmaps.
    #[wasm_bindgen(js_name = clearCache)]
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl NookEngine {
    fn heatmap(
        &self,
        source: &str,
        bytes: &[u8],
        original_width: f64,
        original_height: f64,
    ) -> Result<Arc<Heatmap>, EngineError> {
        let (width, height) = pixel_dimensions(original_width, original_height)?;
        Ok(self
            .cache
            .get_or_build_image(source, bytes, width, height, &self.builder)?)
    }

    fn suggest(
        &self,
        source: &str,
        bytes: &[u8],
        original_width: f64,
        original_height: f64,
        request: &SuggestRequestJs,
    ) -> Result<Placement, EngineError> {
        let text_color = request.text_color()?;
        let heatmap = self.heatmap(source, bytes, original_width, original_height)?;
        let options = request.options();
        let avoid = request.avoid_rects(options.avoid_padding);

        let mut req = PlacementRequest::new(
            &heatmap,
            request.box_width,
            request.box_height,
            text_color,
        )
        .options(options);
        req.avoid = avoid;

        Ok(req.suggest())
    }
}

impl Default for NookEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// WCAG contrast ratio between two hex colors.
#[wasm_bindgen(js_name = contrastRatio)]
pub fn contrast_ratio(a: &str, b: &str) -> Result<f64, JsError> {
    Ok(nook_color::contrast_ratio(parse_color(a)?, parse_color(b)?))
}

/// Accessibility badges for text over a background.
#[wasm_bindgen(js_name = contrastBadges)]
pub fn contrast_badges(background: &str, text: &str) -> Result<JsValue, JsError> {
    let badges = nook_color::contrast_badges(parse_color(background)?, parse_color(text)?);
    serde_wasm_bindgen::to_value(&BadgesJs::from(badges))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Hue rotated by 180 degrees.
#[wasm_bindgen]
pub fn complementary(hex: &str) -> Result<String, JsError> {
    Ok(nook_color::complementary(parse_color(hex)?).to_hex())
}

/// The two triad colors at +120 and -120 degrees.
#[wasm_bindgen]
pub fn triad(hex: &str) -> Result<Vec<String>, JsError> {
    Ok(nook_color::triad(parse_color(hex)?)
        .iter()
        .map(Rgb::to_hex)
        .collect())
}

fn parse_color(hex: &str) -> Result<Rgb, JsError> {
    hex.parse::<Rgb>().map_err(|e| JsError::new(&e.to_string()))
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
