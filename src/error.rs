//! Errors for the few fallible entry points (configuration loading).
//!
//! Everything on the input and reconciliation path is infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DuelError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type DuelResult<T> = Result<T, DuelError>;
