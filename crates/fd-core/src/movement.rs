//! Movement category enum shared across all flow crates.
//!
//! Exactly four kinds exist and every flow point carries one — there is no
//! "unknown" variant.  Adding a kind is a deliberate cross-crate change
//! (spawn probabilities, intensity tables, marker styles), so the enum is
//! exhaustive on purpose.

/// What a flow point represents moving through the city.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementKind {
    Pedestrian,
    Vehicle,
    Transit,
    Bicycle,
}

impl MovementKind {
    /// All four kinds, in stable rendering order.
    pub const ALL: [MovementKind; 4] = [
        MovementKind::Pedestrian,
        MovementKind::Vehicle,
        MovementKind::Transit,
        MovementKind::Bicycle,
    ];

    /// Animation pacing factor applied on top of the modelled speed when
    /// advancing progress each tick.  Keeps slow categories readable without
    /// distorting the speed model itself.
    #[inline]
    pub fn pace_factor(self) -> f64 {
        match self {
            MovementKind::Pedestrian => 0.6,
            MovementKind::Vehicle    => 1.0,
            MovementKind::Transit    => 1.2,
            MovementKind::Bicycle    => 0.8,
        }
    }

    /// Human-readable label, useful for CSV column values and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Pedestrian => "pedestrian",
            MovementKind::Vehicle    => "vehicle",
            MovementKind::Transit    => "transit",
            MovementKind::Bicycle    => "bicycle",
        }
    }

    /// Dense index 0–3 for per-kind accumulator arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            MovementKind::Pedestrian => 0,
            MovementKind::Vehicle    => 1,
            MovementKind::Transit    => 2,
            MovementKind::Bicycle    => 3,
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
