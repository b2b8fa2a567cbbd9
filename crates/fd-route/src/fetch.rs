//! Rate-limited, retry-budgeted fetching over a `RouteSource`.
//!
//! The external provider must never see a burst of back-to-back requests,
//! and a flaky provider must never trap the engine in a retry loop.  Both
//! rules live here so the generator stays oblivious.

use std::time::{Duration, Instant};

use crate::{Route, RouteError, RoutePair, RouteResult, RouteSource};

// ── FetchPolicy ───────────────────────────────────────────────────────────────

/// Pacing and retry configuration.
#[derive(Debug, Clone, Copy)]
pub struct FetchPolicy {
    /// Minimum spacing between successive provider calls.
    pub min_gap: Duration,
    /// Attempts per pair before giving up with `RetryBudgetExhausted`.
    pub max_attempts: u32,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            min_gap:      Duration::from_millis(150),
            max_attempts: 3,
        }
    }
}

// ── RateLimiter ───────────────────────────────────────────────────────────────

/// Tracks the last provider call and computes the pause the next one owes.
///
/// Time is injected so tests fabricate instants instead of sleeping.
#[derive(Debug)]
pub(crate) struct RateLimiter {
    min_gap:   Duration,
    last_call: Option<Instant>,
}

impl RateLimiter {
    pub(crate) fn new(min_gap: Duration) -> Self {
        Self { min_gap, last_call: None }
    }

    /// Register a call happening at `now` (after any returned pause) and
    /// return how long the caller must wait first.
    pub(crate) fn before_call(&mut self, now: Instant) -> Duration {
        let pause = match self.last_call {
            None => Duration::ZERO,
            Some(last) => self.min_gap.saturating_sub(now.duration_since(last)),
        };
        self.last_call = Some(now + pause);
        pause
    }
}

// ── RouteFetcher ──────────────────────────────────────────────────────────────

/// Wraps a [`RouteSource`] with pacing and a retry budget.
///
/// `fetch` runs inside the generation task, which is allowed to take a batch
/// of work between frames; the pacing pause is a cooperative `sleep`, not a
/// spin.
pub struct RouteFetcher<S: RouteSource> {
    source:  S,
    policy:  FetchPolicy,
    limiter: RateLimiter,
}

impl<S: RouteSource> RouteFetcher<S> {
    pub fn new(source: S, policy: FetchPolicy) -> Self {
        Self {
            limiter: RateLimiter::new(policy.min_gap),
            source,
            policy,
        }
    }

    pub fn with_default_policy(source: S) -> Self {
        Self::new(source, FetchPolicy::default())
    }

    /// Fetch a route for `pair`, retrying up to the policy's budget.
    ///
    /// Empty results count as failures.  `Malformed` aborts immediately —
    /// re-sending an invalid request cannot help.  Everything else retries,
    /// then collapses into `RetryBudgetExhausted`, which callers treat the
    /// same as `Unavailable`.
    pub fn fetch(&mut self, pair: &RoutePair) -> RouteResult<Route> {
        let attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            let pause = self.limiter.before_call(Instant::now());
            if !pause.is_zero() {
                std::thread::sleep(pause);
            }

            match self.source.compute_route(pair.origin, pair.destination) {
                Ok(route) if !route.is_empty() => return Ok(route),
                Ok(_) => {
                    log::debug!("route attempt {attempt}/{attempts}: empty polyline");
                }
                Err(RouteError::Malformed(m)) => {
                    return Err(RouteError::Malformed(m));
                }
                Err(e) => {
                    log::debug!("route attempt {attempt}/{attempts} failed: {e}");
                }
            }
        }

        Err(RouteError::RetryBudgetExhausted { attempts })
    }

    /// Borrow the wrapped source (e.g. to inspect a test double).
    pub fn source(&self) -> &S {
        &self.source
    }
}

// ── RouteProvider ─────────────────────────────────────────────────────────────

/// Object-safe facade over [`RouteFetcher`] so consumers can hold
/// `Option<&mut dyn RouteProvider>` without naming the source type.
pub trait RouteProvider {
    fn fetch_route(&mut self, pair: &RoutePair) -> RouteResult<Route>;
}

impl<S: RouteSource> RouteProvider for RouteFetcher<S> {
    fn fetch_route(&mut self, pair: &RoutePair) -> RouteResult<Route> {
        self.fetch(pair)
    }
}
