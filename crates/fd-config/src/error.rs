use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("catalog parse error: {0}")]
    Parse(String),

    #[error("unknown city {0:?} in POI file")]
    UnknownCity(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
