//! `fd-core` — foundational types for the urban-flow dashboard engine.
//!
//! This crate is a dependency of every other `fd-*` crate.  It intentionally
//! has no `fd-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `PointId`, `RouteId`, `CityId`                           |
//! | [`geo`]      | `GeoPoint`, haversine distance, bearing, interpolation   |
//! | [`time`]     | `TimestampMs`, `LocalTime`, `DayPhase`, `TimeBucket`     |
//! | [`rng`]      | `EngineRng` (deterministic, seed-mixed)                  |
//! | [`movement`] | `MovementKind` enum                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; required by `fd-config`. |

pub mod geo;
pub mod ids;
pub mod movement;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{CityId, PointId, RouteId};
pub use movement::MovementKind;
pub use rng::EngineRng;
pub use time::{CommuteBias, DayPhase, LocalTime, TimeBucket, TimestampMs, Weekday};
