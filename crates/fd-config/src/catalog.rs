//! Catalog types: cities, points of interest, and time ranges.

use serde::{Deserialize, Serialize};

use fd_core::{CityId, GeoPoint};

// ── CityConfig ────────────────────────────────────────────────────────────────

/// One dashboard city: where the map centers and how the local clock runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,

    /// Map center; also the anchor for procedural point synthesis.
    pub center: GeoPoint,

    /// Zoom the map opens at when this city is selected.
    pub zoom_default: u8,

    /// Minutes east of UTC (e.g. -300 for New York in winter).  Applied
    /// before any hour-of-day classification.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Points of interest used as route-pair origins/destinations.  May be
    /// empty — the route planner synthesizes a ring around `center` then.
    #[serde(default)]
    pub pois: Vec<Poi>,
}

/// A named point of interest inside a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub name: String,
    pub location: GeoPoint,
}

// ── TimeRangeConfig ───────────────────────────────────────────────────────────

/// A selectable timeline span (e.g. "last 24 hours", "this week").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRangeConfig {
    /// Stable identifier used by the UI ("24h", "7d", …).
    pub id: String,

    /// Display label.
    pub label: String,

    /// How many days the range spans, ending at the live edge.
    pub days: u16,

    /// Timeline marker/scrub granularity in minutes.
    pub granularity_minutes: u32,
}

impl TimeRangeConfig {
    /// Total span in milliseconds.
    #[inline]
    pub fn span_ms(&self) -> i64 {
        self.days as i64 * 86_400_000
    }

    /// `true` for configurations the generator can work with.  A zero-day or
    /// zero-granularity range is malformed input and yields no data.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.days > 0 && self.granularity_minutes > 0
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// The full static configuration surface: all cities and all time ranges.
///
/// Cities are addressed by `CityId` — their index in `cities` — so the rest
/// of the engine never carries strings around.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub cities: Vec<CityConfig>,
    pub time_ranges: Vec<TimeRangeConfig>,
}

impl Catalog {
    /// Look up a city by ID.  `None` for out-of-range or `INVALID` IDs.
    pub fn city(&self, id: CityId) -> Option<&CityConfig> {
        self.cities.get(id.index())
    }

    /// Resolve a city name to its `CityId` (exact match).
    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.cities
            .iter()
            .position(|c| c.name == name)
            .map(|i| CityId(i as u16))
    }

    /// Look up a time range by its stable `id`.
    pub fn time_range(&self, id: &str) -> Option<&TimeRangeConfig> {
        self.time_ranges.iter().find(|r| r.id == id)
    }
}
