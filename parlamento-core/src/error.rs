//! Error types for the parlamento core.

use thiserror::Error;

/// Errors raised at the edges of the core: configuration, record decoding and
/// construction of values whose invariants are checked up front.
#[derive(Error, Debug)]
pub enum ParlamentoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not decode schedule records: {0}")]
    RecordDecode(#[from] serde_json::Error),

    #[error("Duplicate schedule record id '{0}'")]
    DuplicateRecordId(String),

    #[error("Visibility threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Month index must be in 0..=11, got {0}")]
    InvalidMonth(u32),

    #[error("Year {0} is outside the supported range")]
    InvalidYear(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parlamento operations.
pub type ParlamentoResult<T> = Result<T, ParlamentoError>;
