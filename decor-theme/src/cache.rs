// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outline caching to avoid regenerating decoration paths.
//!
//! Outlines are pure functions of their inputs, so the cache key is the full
//! input tuple: shape type, bounds, shade width, rounding, border width and
//! every mask bit. Two components with equal inputs share an entry; nothing
//! is keyed by component identity.

use std::num::NonZeroUsize;
use std::sync::Arc;

use decor_core::geometry::Rect;
use lru::LruCache;
use parking_lot::Mutex;

use crate::shape::{compute_outline, OutlineShape, ShapeParams, ShapeType};
use crate::sides::SideMask;

/// Default number of cached outlines.
pub const DEFAULT_CAPACITY: usize = 500;

/// Cache key for an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeKey {
    shape_type: ShapeType,
    bounds_bits: [u64; 4], // f64 converted to bits for hashing
    shade_width: i32,
    round: i32,
    border_width_bits: u64,
    mask: SideMask,
}

impl ShapeKey {
    /// Build the key of an outline computation.
    pub fn new(shape_type: ShapeType, bounds: Rect, mask: &SideMask, params: &ShapeParams) -> Self {
        Self {
            shape_type,
            bounds_bits: [
                bounds.x0.to_bits(),
                bounds.y0.to_bits(),
                bounds.x1.to_bits(),
                bounds.y1.to_bits(),
            ],
            shade_width: params.shade_width,
            round: params.round,
            border_width_bits: params.border_width.to_bits(),
            mask: *mask,
        }
    }
}

#[derive(Default)]
struct CacheStats {
    hits: u64,
    misses: u64,
}

/// LRU cache of computed outlines.
pub struct ShapeCache {
    /// Cached outlines by key
    cache: Mutex<LruCache<ShapeKey, Arc<OutlineShape>>>,
    stats: Mutex<CacheStats>,
}

impl ShapeCache {
    /// Create a new cache with default size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new cache holding at most `capacity` outlines.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Get a cached outline, computing and storing it on a miss.
    pub fn outline(
        &self,
        shape_type: ShapeType,
        bounds: Rect,
        mask: &SideMask,
        params: &ShapeParams,
    ) -> Arc<OutlineShape> {
        let key = ShapeKey::new(shape_type, bounds, mask, params);
        if let Some(outline) = self.cache.lock().get(&key) {
            self.stats.lock().hits += 1;
            return outline.clone();
        }

        let outline = Arc::new(compute_outline(shape_type, bounds, mask, params));
        self.stats.lock().misses += 1;
        self.cache.lock().put(key, outline.clone());
        outline
    }

    /// Get a cached outline without computing it.
    pub fn get(&self, key: &ShapeKey) -> Option<Arc<OutlineShape>> {
        self.cache.lock().get(key).cloned()
    }

    /// Drop every outline of one shape type.
    pub fn invalidate(&self, shape_type: ShapeType) {
        let mut cache = self.cache.lock();
        let stale: Vec<ShapeKey> = cache
            .iter()
            .filter(|(key, _)| key.shape_type == shape_type)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            cache.pop(&key);
        }
    }

    /// Invalidate all cached outlines.
    pub fn invalidate_all(&self) {
        self.cache.lock().clear();
        log::debug!("Shape cache invalidated");
    }

    /// Get cache size.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Number of lookups answered from the cache and number of computations.
    pub fn stats(&self) -> (u64, u64) {
        let stats = self.stats.lock();
        (stats.hits, stats.misses)
    }
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decor_core::geometry::Vec2;

    fn params() -> ShapeParams {
        ShapeParams::new(4, 2, 1.0)
    }

    #[test]
    fn test_hit_returns_same_outline() {
        let cache = ShapeCache::new();
        let bounds = Rect::new(0.0, 0.0, 50.0, 20.0);
        let first = cache.outline(ShapeType::Border, bounds, &SideMask::ALL, &params());
        let second = cache.outline(ShapeType::Border, bounds, &SideMask::ALL, &params());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_every_input_is_part_of_the_key() {
        let cache = ShapeCache::new();
        let bounds = Rect::new(0.0, 0.0, 50.0, 20.0);
        let open = SideMask::parse(Some("1,1,0,1"), None);

        cache.outline(ShapeType::Border, bounds, &SideMask::ALL, &params());
        cache.outline(ShapeType::Background, bounds, &SideMask::ALL, &params());
        cache.outline(ShapeType::Border, bounds, &open, &params());
        cache.outline(ShapeType::Border, bounds + Vec2::new(1.0, 0.0), &SideMask::ALL, &params());
        cache.outline(ShapeType::Border, bounds, &SideMask::ALL, &ShapeParams::new(5, 2, 1.0));

        assert_eq!(cache.len(), 5);
        assert_eq!(cache.stats(), (0, 5));
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = ShapeCache::with_capacity(2);
        let mask = SideMask::ALL;
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 20.0, 10.0);
        let c = Rect::new(0.0, 0.0, 30.0, 10.0);

        cache.outline(ShapeType::Border, a, &mask, &params());
        cache.outline(ShapeType::Border, b, &mask, &params());
        cache.outline(ShapeType::Border, a, &mask, &params());
        cache.outline(ShapeType::Border, c, &mask, &params());

        assert!(cache.get(&ShapeKey::new(ShapeType::Border, a, &mask, &params())).is_some());
        assert!(cache.get(&ShapeKey::new(ShapeType::Border, b, &mask, &params())).is_none());
    }

    #[test]
    fn test_invalidation() {
        let cache = ShapeCache::new();
        let bounds = Rect::new(0.0, 0.0, 50.0, 20.0);
        cache.outline(ShapeType::Border, bounds, &SideMask::ALL, &params());
        cache.outline(ShapeType::Background, bounds, &SideMask::ALL, &params());

        cache.invalidate(ShapeType::Border);
        assert_eq!(cache.len(), 1);

        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
