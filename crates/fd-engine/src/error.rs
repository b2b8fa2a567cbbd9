//! Engine error type.

use fd_core::CityId;
use thiserror::Error;

/// Errors surfaced by engine control operations.
///
/// Playback and generation themselves never error — they degrade (see
/// `fd-gen`).  These variants cover control input that cannot be honoured.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog must contain at least one city and one time range")]
    EmptyCatalog,

    #[error("unknown city: {0}")]
    CityNotFound(CityId),

    #[error("unknown time range: {0:?}")]
    UnknownTimeRange(String),

    #[error("unsupported speed multiplier: {0}")]
    UnsupportedSpeed(f64),
}

pub type EngineResult<T> = Result<T, EngineError>;
