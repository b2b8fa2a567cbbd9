//! Which movement kinds appear on a route segment.
//!
//! Every segment carries a vehicle; the other kinds join stochastically so
//! that a batch mixes categories without every segment looking identical.

use fd_core::{EngineRng, LocalTime, MovementKind};

/// Spawn probability for a pedestrian alongside the vehicle.
const PEDESTRIAN_P: f64 = 0.4;
/// Spawn probability for a transit point.
const TRANSIT_P: f64 = 0.2;
/// Spawn probability for a bicycle — only rolled during daylight.
const BICYCLE_P: f64 = 0.3;

/// The movement kinds instantiated on one route segment: one to four
/// entries, vehicle always first.
///
/// Bicycles only appear during the daylight window (07:00–18:59 local).
pub fn spawn_kinds(local: LocalTime, rng: &mut EngineRng) -> Vec<MovementKind> {
    let mut kinds = Vec::with_capacity(4);
    kinds.push(MovementKind::Vehicle);

    if rng.gen_bool(PEDESTRIAN_P) {
        kinds.push(MovementKind::Pedestrian);
    }
    if rng.gen_bool(TRANSIT_P) {
        kinds.push(MovementKind::Transit);
    }
    if local.is_daylight() && rng.gen_bool(BICYCLE_P) {
        kinds.push(MovementKind::Bicycle);
    }

    kinds
}
