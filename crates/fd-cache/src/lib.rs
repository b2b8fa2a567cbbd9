//! `fd-cache` — memoization of generated flow data.
//!
//! # Crate layout
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`store`] | `FlowCache<V>`, `CacheEntry<V>`, `CacheLookup`    |
//!
//! # Design
//!
//! Keys are `(CityId, TimeBucket)`: timestamps inside the same bucket want
//! near-identical data, so one entry serves them all.  Expiry is lazy — an
//! expired entry is dropped the next time its key is read; there is no
//! background sweep to schedule or cancel.
//!
//! The cache is an explicitly owned object injected into the engine, never
//! ambient global state: two engine instances never share entries.

pub mod store;


pub use store::{CacheEntry, CacheKey, CacheLookup, FlowCache};
