//! `fd-route` — the external route/directions boundary.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`source`] | `RouteSource` trait, `Route`/`Leg`/`Step`, `UnavailableRouteSource` |
//! | [`pairs`]  | `RoutePair`, commute-biased pair planning                   |
//! | [`fetch`]  | `RouteFetcher` — rate limiting + retry budget               |
//! | [`error`]  | `RouteError`, `RouteResult<T>`                              |
//!
//! # Failure policy
//!
//! Nothing in this crate is fatal to the dashboard.  Every failure mode —
//! provider down, empty results, throttling, exhausted retries — surfaces as
//! a `RouteError` that the generator answers with its procedural fallback.
//! The only user-visible consequence is an informational notice.

pub mod error;
pub mod fetch;
pub mod pairs;
pub mod source;


pub use error::{RouteError, RouteResult};
pub use fetch::{FetchPolicy, RouteFetcher, RouteProvider};
pub use pairs::{RoutePair, plan_route_pairs};
pub use source::{Leg, Route, RouteSource, Step, UnavailableRouteSource};
