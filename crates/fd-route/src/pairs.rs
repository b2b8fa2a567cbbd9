//! Commute-biased origin/destination pair planning.
//!
//! Pairs are ephemeral — synthesized per generation request from the city's
//! POI list and the local hour, then forgotten.  The bias reproduces the
//! daily tide: mornings flow from the outskirts towards the center, evenings
//! back out, and off-peak trips wander between points of interest.

use fd_core::{CommuteBias, EngineRng, GeoPoint, LocalTime};

/// An origin/destination pair to request (or simulate) a route for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePair {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

/// Radius band (metres) where "outskirts" origins/destinations are placed.
const OUTSKIRTS_MIN_M: f64 = 2_500.0;
const OUTSKIRTS_MAX_M: f64 = 6_000.0;

/// Radius band for the synthesized POI ring used when a city has no catalog
/// POIs.
const RING_MIN_M: f64 = 800.0;
const RING_MAX_M: f64 = 2_200.0;
const RING_SIZE: usize = 8;

/// Plan up to `max_pairs` origin/destination pairs for a city.
///
/// `pois` come from the city catalog; an empty slice is answered with a
/// synthesized ring around `center` so the planner never returns nothing
/// for a well-formed city.
pub fn plan_route_pairs(
    center:    GeoPoint,
    pois:      &[GeoPoint],
    local:     LocalTime,
    max_pairs: usize,
    rng:       &mut EngineRng,
) -> Vec<RoutePair> {
    if max_pairs == 0 {
        return vec![];
    }

    let anchors = if pois.is_empty() {
        synthesize_ring(center, rng)
    } else {
        pois.to_vec()
    };

    match local.commute_bias() {
        CommuteBias::Inbound  => commute_pairs(center, &anchors, max_pairs, rng, true),
        CommuteBias::Outbound => commute_pairs(center, &anchors, max_pairs, rng, false),
        CommuteBias::Tour     => tour_pairs(&anchors, max_pairs, rng),
    }
}

/// Outskirts↔center pairs.  `inbound` chooses the direction.
fn commute_pairs(
    center:    GeoPoint,
    anchors:   &[GeoPoint],
    max_pairs: usize,
    rng:       &mut EngineRng,
    inbound:   bool,
) -> Vec<RoutePair> {
    (0..max_pairs)
        .map(|_| {
            let outskirts = random_outskirts(center, rng);
            // The central endpoint is a POI, keeping commutes anchored to
            // real destinations rather than the exact map center.
            let central = *rng.choose(anchors).unwrap_or(&center);
            if inbound {
                RoutePair { origin: outskirts, destination: central }
            } else {
                RoutePair { origin: central, destination: outskirts }
            }
        })
        .collect()
}

/// POI-to-POI chained tour: each pair starts where the previous one ended.
fn tour_pairs(anchors: &[GeoPoint], max_pairs: usize, rng: &mut EngineRng) -> Vec<RoutePair> {
    let mut order = anchors.to_vec();
    rng.shuffle(&mut order);

    // Chaining needs one more anchor than pairs; wrap around if short.
    let mut pairs = Vec::with_capacity(max_pairs);
    for i in 0..max_pairs {
        let origin = order[i % order.len()];
        let destination = order[(i + 1) % order.len()];
        if origin != destination {
            pairs.push(RoutePair { origin, destination });
        }
    }
    pairs
}

fn random_outskirts(center: GeoPoint, rng: &mut EngineRng) -> GeoPoint {
    let bearing = rng.gen_range(0.0..360.0);
    let distance = rng.gen_range(OUTSKIRTS_MIN_M..OUTSKIRTS_MAX_M);
    center.destination(bearing, distance)
}

fn synthesize_ring(center: GeoPoint, rng: &mut EngineRng) -> Vec<GeoPoint> {
    (0..RING_SIZE)
        .map(|i| {
            let bearing = i as f64 * (360.0 / RING_SIZE as f64);
            let distance = rng.gen_range(RING_MIN_M..RING_MAX_M);
            center.destination(bearing, distance)
        })
        .collect()
}
