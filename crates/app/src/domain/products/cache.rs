//! Product list cache.
//!
//! A single-slot read-through cache with write-invalidation: one successful
//! `GET /products` populates it, any product mutation empties it. It never
//! holds partial or error results, and a stale entry is never served; the
//! freshness check happens on every read against the caller's clock.

use std::sync::{Mutex, PoisonError};

use jiff::{SignedDuration, Timestamp};
use kotsell::products::Product;

#[derive(Debug, Clone)]
struct CacheEntry {
    products: Vec<Product>,
    fetched_at: Timestamp,
}

/// Time-boxed cache for the full product list.
#[derive(Debug)]
pub struct ProductCache {
    ttl: SignedDuration,
    slot: Mutex<Option<CacheEntry>>,
}

impl ProductCache {
    /// Creates an empty cache with the given freshness window.
    #[must_use]
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached list when it is still inside the freshness window
    /// as of `now`.
    pub fn get(&self, now: Timestamp) -> Option<Vec<Product>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = slot.as_ref()?;

        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(entry.products.clone())
        } else {
            None
        }
    }

    /// Replaces the cached list, stamped at `now`.
    pub fn put(&self, products: Vec<Product>, now: Timestamp) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = Some(CacheEntry {
            products,
            fetched_at: now,
        });
    }

    /// Empties the cache so the next read refetches.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use kotsell::products::ProductId;
    use rust_decimal::Decimal;
    use smallvec::SmallVec;

    use super::*;

    fn products() -> Vec<Product> {
        vec![Product {
            id: ProductId::from_i64(1),
            name: "Shoei helmet".to_owned(),
            description: String::new(),
            price: Decimal::from(12_000),
            stock: 3,
            categories: SmallVec::new(),
            images: Vec::new(),
        }]
    }

    fn minutes(n: i64) -> Timestamp {
        Timestamp::UNIX_EPOCH + SignedDuration::from_mins(n)
    }

    #[test]
    fn fresh_entry_is_served() {
        let cache = ProductCache::new(SignedDuration::from_mins(5));

        cache.put(products(), minutes(0));

        assert_eq!(cache.get(minutes(4)).map(|p| p.len()), Some(1));
    }

    #[test]
    fn entry_at_or_past_the_window_is_stale() {
        let cache = ProductCache::new(SignedDuration::from_mins(5));

        cache.put(products(), minutes(0));

        assert!(cache.get(minutes(5)).is_none());
        assert!(cache.get(minutes(60)).is_none());
    }

    #[test]
    fn empty_cache_misses() {
        let cache = ProductCache::new(SignedDuration::from_mins(5));

        assert!(cache.get(minutes(0)).is_none());
    }

    #[test]
    fn invalidate_empties_the_slot() {
        let cache = ProductCache::new(SignedDuration::from_mins(5));

        cache.put(products(), minutes(0));
        cache.invalidate();

        assert!(cache.get(minutes(1)).is_none());
    }
}
