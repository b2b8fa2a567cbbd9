//! `fd-config` — static city/time-range catalogs and timeline markers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`catalog`] | `CityConfig`, `Poi`, `TimeRangeConfig`, `Catalog`         |
//! | [`loader`]  | `load_catalog_json`, `load_pois_csv` (+ `Read` variants)  |
//! | [`markers`] | `TimeMarker`, `time_markers`                              |
//! | [`error`]   | `ConfigError`, `ConfigResult<T>`                          |
//!
//! The catalogs are lookup tables, not computed state: the dashboard UI
//! ships them as JSON (cities, time ranges) and CSV (per-city points of
//! interest), and the engine only ever reads them.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod markers;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CityConfig, Poi, TimeRangeConfig};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_catalog_json, load_catalog_reader, load_pois_csv, load_pois_reader};
pub use markers::{TimeMarker, time_markers};
