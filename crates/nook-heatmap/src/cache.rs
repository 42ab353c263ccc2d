//! Memoization of built heatmaps per (source, width, height).

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{Heatmap, HeatmapBuilder, HeatmapError};

/// Deterministic cache key for an image source and its original dimensions.
pub fn cache_key(source: &str, original_width: u32, original_height: u32) -> String {
    format!("{source}@{original_width}x{original_height}")
}

/// Shared store of built heatmaps.
///
/// Entries are write-once per key. The lock is released while a heatmap is
/// being built, so two callers missing on the same key may both build; the
/// first result stored is kept and handed to both.
pub struct HeatmapCache {
    entries: Mutex<LruCache<String, Arc<Heatmap>>>,
}

impl HeatmapCache {
    /// A cache holding at most `capacity` heatmaps, evicting the least
    /// recently used.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// A cache that never evicts.
    pub fn unbounded() -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
        }
    }

    /// Look up a heatmap without building.
    pub fn get(&self, key: &str) -> Option<Arc<Heatmap>> {
        self.entries.lock().get(key).cloned()
    }

    /// Return the cached heatmap for `key`, or run `build` and store its
    /// result. Build errors are returned and nothing is stored.
    pub fn get_or_build<F>(&self, key: &str, build: F) -> Result<Arc<Heatmap>, HeatmapError>
    where
        F: FnOnce() -> Result<Heatmap, HeatmapError>,
    {
        if let Some(hit) = self.get(key) {
            trace!(key, "heatmap cache hit");
            return Ok(hit);
        }

        debug!(key, "heatmap cache miss");
        let built = Arc::new(build()?);

        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(key) {
            return Ok(Arc::clone(existing));
        }
        if let Some((evicted, _)) = entries.push(key.to_string(), Arc::clone(&built)) {
            debug!(key = %evicted, "evicted heatmap");
        }
        Ok(built)
    }

    /// Decode and build through `builder` on a miss.
    pub fn get_or_build_image(
        &self,
        source: &str,
        bytes: &[u8],
        original_width: u32,
        original_height: u32,
        builder: &HeatmapBuilder,
    ) -> Result<Arc<Heatmap>, HeatmapError> {
        let key = cache_key(source, original_width, original_height);
        self.get_or_build(&key, || {
            builder.build(bytes, original_width, original_height)
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for HeatmapCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl std::fmt::Debug for HeatmapCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatmapCache")
            .field("len", &self.len())
            .finish()
    }
}
