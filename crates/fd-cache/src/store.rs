//! The keyed TTL store with single-flight population.

use rustc_hash::{FxHashMap, FxHashSet};

use fd_core::{CityId, TimeBucket, TimestampMs};

/// Cache key: which city, which wall-clock window.
pub type CacheKey = (CityId, TimeBucket);

/// One cached value plus its lifetime bounds.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub created_at: TimestampMs,
    pub expires_at: TimestampMs,
}

/// Outcome of [`FlowCache::lookup`].
#[derive(Debug, PartialEq)]
pub enum CacheLookup<'a, V> {
    /// Fresh entry present.
    Hit(&'a V),
    /// Absent and not being fetched.  The caller now owns population for
    /// this key and must call [`complete`][FlowCache::complete] or
    /// [`abandon`][FlowCache::abandon].
    Miss,
    /// Another fetch for this key is already in flight; await its result
    /// instead of issuing a duplicate external call.
    Pending,
}

/// Keyed TTL store with per-key in-flight markers.
///
/// Integer-pair keys hash on the hot path of every generation request, so
/// the maps use FxHash rather than SipHash.
pub struct FlowCache<V> {
    entries: FxHashMap<CacheKey, CacheEntry<V>>,
    in_flight: FxHashSet<CacheKey>,
}

impl<V> Default for FlowCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FlowCache<V> {
    pub fn new() -> Self {
        Self {
            entries:   FxHashMap::default(),
            in_flight: FxHashSet::default(),
        }
    }

    /// Read-only lookup with lazy expiry.  Does not touch in-flight state.
    pub fn get(&mut self, key: CacheKey, now: TimestampMs) -> Option<&V> {
        self.remove_if_expired(key, now);
        self.entries.get(&key).map(|e| &e.data)
    }

    /// Lookup that claims population duty on a miss.
    ///
    /// Exactly one caller per key observes `Miss` until that caller
    /// completes or abandons; everyone else sees `Pending` (or `Hit` once
    /// populated).  This is what keeps concurrent requests for the same
    /// (city, bucket) down to a single external fetch.
    pub fn lookup(&mut self, key: CacheKey, now: TimestampMs) -> CacheLookup<'_, V> {
        self.remove_if_expired(key, now);
        if let Some(entry) = self.entries.get(&key) {
            return CacheLookup::Hit(&entry.data);
        }
        if self.in_flight.contains(&key) {
            return CacheLookup::Pending;
        }
        self.in_flight.insert(key);
        CacheLookup::Miss
    }

    /// Store `data` under `key` with the given TTL and release the in-flight
    /// marker (if any).
    pub fn complete(&mut self, key: CacheKey, data: V, now: TimestampMs, ttl_ms: i64) {
        self.in_flight.remove(&key);
        self.entries.insert(
            key,
            CacheEntry {
                data,
                created_at: now,
                expires_at: now.offset_ms(ttl_ms),
            },
        );
    }

    /// Release the in-flight marker without storing anything — the fetch
    /// failed or its result was superseded by a newer request.
    pub fn abandon(&mut self, key: CacheKey) {
        self.in_flight.remove(&key);
    }

    /// Direct insert without single-flight bookkeeping.
    pub fn put(&mut self, key: CacheKey, data: V, now: TimestampMs, ttl_ms: i64) {
        self.complete(key, data, now, ttl_ms);
    }

    /// `true` while a fetch for `key` is outstanding.
    pub fn is_in_flight(&self, key: CacheKey) -> bool {
        self.in_flight.contains(&key)
    }

    /// Number of stored entries (including any not yet lazily expired).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and markers — used when the catalog itself changes.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
    }

    fn remove_if_expired(&mut self, key: CacheKey, now: TimestampMs) {
        let expired = self
            .entries
            .get(&key)
            .is_some_and(|e| e.expires_at <= now);
        if expired {
            self.entries.remove(&key);
        }
    }
}
