//! Route data model and the pluggable source trait.
//!
//! The shape mirrors what directions providers return — legs of steps, each
//! step carrying a polyline — so an adapter over a real provider is a plain
//! field-by-field mapping.  The engine only ever consumes the flattened
//! per-segment view.

use fd_core::GeoPoint;

use crate::{RouteError, RouteResult};

// ── Route data model ──────────────────────────────────────────────────────────

/// One step of a route leg: a polyline plus its length and duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub path: Vec<GeoPoint>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// One leg of a route (between two waypoints).
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub steps: Vec<Step>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A complete route as returned by the external source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub legs: Vec<Leg>,
}

impl Route {
    /// Build a single-leg, single-step route from a bare polyline.
    /// Convenient for tests and simple providers.
    pub fn from_polyline(path: Vec<GeoPoint>, distance_m: f64, duration_s: f64) -> Route {
        Route {
            legs: vec![Leg {
                steps: vec![Step { path, distance_m, duration_s }],
                distance_m,
                duration_s,
            }],
        }
    }

    /// Total length across all legs, metres.
    pub fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_m).sum()
    }

    /// Total duration across all legs, seconds.
    pub fn total_duration_s(&self) -> f64 {
        self.legs.iter().map(|l| l.duration_s).sum()
    }

    /// The route's polyline flattened across legs and steps, with
    /// consecutive duplicate vertices removed.
    pub fn flat_path(&self) -> Vec<GeoPoint> {
        let mut path: Vec<GeoPoint> = Vec::new();
        for leg in &self.legs {
            for step in &leg.steps {
                for &p in &step.path {
                    if path.last() != Some(&p) {
                        path.push(p);
                    }
                }
            }
        }
        path
    }

    /// Consecutive `(start, end)` pairs of the flattened polyline — the
    /// segments flow points travel along.
    pub fn segments(&self) -> Vec<(GeoPoint, GeoPoint)> {
        let path = self.flat_path();
        path.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// `true` when the route carries no usable polyline (fewer than two
    /// distinct vertices).  Empty routes are treated as "unavailable".
    pub fn is_empty(&self) -> bool {
        self.flat_path().len() < 2
    }
}

// ── RouteSource trait ─────────────────────────────────────────────────────────

/// Pluggable external directions provider.
///
/// Implementations adapt whatever transport the deployment uses (HTTP
/// directions API, recorded fixtures, a local router).  `&mut self` lets
/// adapters keep connection or quota state without interior mutability.
pub trait RouteSource {
    /// Compute a route from `origin` to `destination`.
    ///
    /// An `Err` of any variant, or an `Ok` route that
    /// [`is_empty`](Route::is_empty), both mean "unavailable" to the caller
    /// — never fatal.
    fn compute_route(&mut self, origin: GeoPoint, destination: GeoPoint)
    -> RouteResult<Route>;
}

/// A source that is permanently unavailable.
///
/// Stands in when routing is disabled or in explicit simulation mode; the
/// generator sees `Unavailable` and goes procedural immediately.
pub struct UnavailableRouteSource;

impl RouteSource for UnavailableRouteSource {
    fn compute_route(&mut self, _: GeoPoint, _: GeoPoint) -> RouteResult<Route> {
        Err(RouteError::Unavailable("routing disabled".into()))
    }
}
