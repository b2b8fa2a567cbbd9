//! Batch generation: route-derived flow points with a procedural fallback.
//!
//! One call to [`FlowGenerator::generate`] produces the complete point set
//! for a `(city, timestamp, range)` request.  When a route provider is
//! available and yields at least one usable route, points ride route
//! segments; otherwise the generator synthesizes a radial batch around the
//! city center.  Either way the caller gets a `Vec<FlowPoint>` — generation
//! never fails, it only degrades.

use fd_config::{CityConfig, TimeRangeConfig};
use fd_core::{EngineRng, GeoPoint, LocalTime, MovementKind, PointId, RouteId, TimestampMs};
use fd_model::{
    congestion_speed_scale, movement_profile, procedural_intensity_factor, spawn_kinds,
};
use fd_route::{Route, RouteError, RouteProvider, plan_route_pairs};

use crate::FlowPoint;

// ── GeneratorConfig ───────────────────────────────────────────────────────────

/// Tuning knobs for one generator instance.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Hard cap on points per batch.
    pub max_points: usize,

    /// Fraction of `max_points` beyond which spawns are probabilistically
    /// dropped, so batches taper towards the cap instead of slamming into
    /// it on one route.
    pub near_cap_fraction: f64,

    /// Drop probability applied in the near-cap band.
    pub near_cap_drop_p: f64,

    /// Origin/destination pairs requested per batch.
    pub max_route_pairs: usize,

    /// Batch size of the procedural fallback.
    pub procedural_points: usize,

    /// Radius (metres) of the procedural scatter around the city center.
    pub procedural_radius_m: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_points:          5_000,
            near_cap_fraction:   0.9,
            near_cap_drop_p:     0.7,
            max_route_pairs:     10,
            procedural_points:   100,
            procedural_radius_m: 4_000.0,
        }
    }
}

// ── FlowGenerator ─────────────────────────────────────────────────────────────

/// Stateless batch generator; all per-request state is passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGenerator {
    config: GeneratorConfig,
}

impl FlowGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the point batch for one `(city, timestamp, range)` request.
    ///
    /// Malformed input (bad center coordinates, zero-length range) yields an
    /// empty batch with a warning rather than an error — the dashboard shows
    /// an empty map, not a crash.
    pub fn generate(
        &self,
        city:      &CityConfig,
        timestamp: TimestampMs,
        range:     &TimeRangeConfig,
        provider:  Option<&mut dyn RouteProvider>,
        rng:       &mut EngineRng,
    ) -> Vec<FlowPoint> {
        if !Self::center_valid(city.center) || !range.is_valid() {
            log::warn!(
                "malformed generation request for {:?}: center {} range {}d/{}m",
                city.name,
                city.center,
                range.days,
                range.granularity_minutes,
            );
            return vec![];
        }

        let local = timestamp.local(city.utc_offset_minutes);

        if let Some(provider) = provider {
            let routes = self.fetch_routes(city, local, provider, rng);
            if !routes.is_empty() {
                return self.route_points(&routes, local, rng);
            }
            log::info!("no routes for {}; falling back to simulated flows", city.name);
        }

        self.procedural_points(city.center, local, rng)
    }

    fn center_valid(center: GeoPoint) -> bool {
        center.lat.is_finite()
            && center.lon.is_finite()
            && center.lat.abs() <= 90.0
            && center.lon.abs() <= 180.0
    }

    // ── Route-derived batches ────────────────────────────────────────────────

    fn fetch_routes(
        &self,
        city:     &CityConfig,
        local:    LocalTime,
        provider: &mut dyn RouteProvider,
        rng:      &mut EngineRng,
    ) -> Vec<Route> {
        let pois: Vec<GeoPoint> = city.pois.iter().map(|p| p.location).collect();
        let pairs = plan_route_pairs(city.center, &pois, local, self.config.max_route_pairs, rng);

        let mut routes = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            match provider.fetch_route(pair) {
                Ok(route) => routes.push(route),
                Err(RouteError::Malformed(m)) => {
                    // Only this pair is bad; the rest may still route.
                    log::debug!("route pair dropped: {m}");
                }
                Err(e) => {
                    // The source is down, not the pair.  Its retry budget is
                    // already spent; asking for the remaining pairs would
                    // just burn it again.
                    log::debug!("route source down after {} pair(s): {e}", routes.len());
                    break;
                }
            }
        }
        routes
    }

    fn route_points(
        &self,
        routes: &[Route],
        local:  LocalTime,
        rng:    &mut EngineRng,
    ) -> Vec<FlowPoint> {
        let cap = self.config.max_points;
        let near_cap = (cap as f64 * self.config.near_cap_fraction) as usize;

        let mut points = Vec::new();
        'routes: for (route_index, route) in routes.iter().enumerate() {
            let stats = (route.total_distance_m(), route.total_duration_s());

            for (start, end) in route.segments() {
                for kind in spawn_kinds(local, rng) {
                    if points.len() >= cap {
                        break 'routes;
                    }
                    if points.len() >= near_cap && rng.gen_bool(self.config.near_cap_drop_p) {
                        continue;
                    }

                    let profile = movement_profile(kind, local, Some(stats), rng);
                    points.push(FlowPoint {
                        id:            PointId(points.len() as u32),
                        position:      start,
                        next_position: end,
                        bearing_deg:   start.bearing_deg(end),
                        // Randomized start phase so a fresh batch does not
                        // pulse in lockstep.
                        progress:      rng.gen_range(0.0..1.0),
                        route:         RouteId(route_index as u16),
                        speed:         profile.speed,
                        intensity:     profile.intensity,
                        kind,
                    });
                }
            }
        }
        points
    }

    // ── Procedural fallback ──────────────────────────────────────────────────

    /// Segment length band for synthesized travel segments, metres.
    const SEGMENT_MIN_M: f64 = 150.0;
    const SEGMENT_MAX_M: f64 = 600.0;
    /// Minimum scatter distance from the center, metres.
    const SCATTER_MIN_M: f64 = 200.0;

    fn procedural_points(
        &self,
        center: GeoPoint,
        local:  LocalTime,
        rng:    &mut EngineRng,
    ) -> Vec<FlowPoint> {
        let count = self.config.procedural_points.min(self.config.max_points);
        let factor = procedural_intensity_factor(local);
        let speed_scale = congestion_speed_scale(local);

        let mut kinds = vec![
            MovementKind::Vehicle,
            MovementKind::Pedestrian,
            MovementKind::Transit,
        ];
        if local.is_daylight() {
            kinds.push(MovementKind::Bicycle);
        }

        (0..count)
            .map(|i| {
                let scatter_bearing = rng.gen_range(0.0..360.0);
                let scatter_dist =
                    rng.gen_range(Self::SCATTER_MIN_M..self.config.procedural_radius_m);
                let start = center.destination(scatter_bearing, scatter_dist);

                let travel_bearing = rng.gen_range(0.0..360.0);
                let segment_len = rng.gen_range(Self::SEGMENT_MIN_M..Self::SEGMENT_MAX_M);
                let end = start.destination(travel_bearing, segment_len);

                let kind = *rng.choose(&kinds).unwrap_or(&MovementKind::Vehicle);
                let profile = movement_profile(kind, local, None, rng);

                FlowPoint {
                    id:            PointId(i as u32),
                    position:      start,
                    next_position: end,
                    bearing_deg:   start.bearing_deg(end),
                    progress:      rng.gen_range(0.0..1.0),
                    route:         RouteId::INVALID,
                    speed:         profile.speed * speed_scale,
                    intensity:     profile.intensity * factor,
                    kind,
                }
            })
            .collect()
    }
}
