//! Route-subsystem error taxonomy.

use thiserror::Error;

/// Errors produced at the external route boundary.
///
/// All variants are recoverable: callers fall back to procedural synthesis
/// rather than propagating any of these upward.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The provider returned nothing or errored.
    #[error("route source unavailable: {0}")]
    Unavailable(String),

    /// The provider reported throttling; retryable after the pacing gap.
    #[error("route source rate-limited")]
    RateLimited,

    /// All retry attempts were spent without a usable result.
    #[error("route retry budget exhausted after {attempts} attempts")]
    RetryBudgetExhausted { attempts: u32 },

    /// The request itself was invalid (e.g. identical origin/destination).
    #[error("malformed route request: {0}")]
    Malformed(String),
}

pub type RouteResult<T> = Result<T, RouteError>;
