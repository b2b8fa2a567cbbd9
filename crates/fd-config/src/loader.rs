//! Catalog loaders: JSON for cities/time ranges, CSV for POI lists.
//!
//! # JSON catalog format
//!
//! ```json
//! {
//!   "cities": [
//!     { "name": "Testville",
//!       "center": { "lat": 10.0, "lon": 20.0 },
//!       "zoom_default": 12,
//!       "utc_offset_minutes": 0 }
//!   ],
//!   "time_ranges": [
//!     { "id": "24h", "label": "Last 24 hours", "days": 1,
//!       "granularity_minutes": 30 }
//!   ]
//! }
//! ```
//!
//! # POI CSV format
//!
//! One row per point of interest; the `city` column must match a catalog
//! city name exactly.
//!
//! ```csv
//! city,name,lat,lon
//! Testville,Central Station,10.001,20.002
//! Testville,Old Market,9.998,19.995
//! ```
//!
//! Cities absent from the CSV keep an empty POI list (the route planner
//! falls back to a synthesized ring).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fd_core::GeoPoint;

use crate::catalog::{Catalog, Poi};
use crate::ConfigError;

// ── JSON catalog ──────────────────────────────────────────────────────────────

/// Load the city/time-range catalog from a JSON file.
pub fn load_catalog_json(path: &Path) -> Result<Catalog, ConfigError> {
    let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
    load_catalog_reader(file)
}

/// Like [`load_catalog_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded catalogs.
pub fn load_catalog_reader<R: Read>(reader: R) -> Result<Catalog, ConfigError> {
    serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))
}

// ── POI CSV ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PoiRecord {
    city: String,
    name: String,
    lat:  f64,
    lon:  f64,
}

/// Load a POI CSV file and attach the rows to the matching catalog cities.
pub fn load_pois_csv(catalog: &mut Catalog, path: &Path) -> Result<(), ConfigError> {
    let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
    load_pois_reader(catalog, file)
}

/// Like [`load_pois_csv`] but accepts any `Read` source.
pub fn load_pois_reader<R: Read>(
    catalog: &mut Catalog,
    reader: R,
) -> Result<(), ConfigError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    for result in csv_reader.deserialize::<PoiRecord>() {
        let row = result.map_err(|e| ConfigError::Parse(e.to_string()))?;

        let city = catalog
            .cities
            .iter_mut()
            .find(|c| c.name == row.city)
            .ok_or_else(|| ConfigError::UnknownCity(row.city.clone()))?;

        city.pois.push(Poi {
            name:     row.name,
            location: GeoPoint::new(row.lat, row.lon),
        });
    }

    Ok(())
}
