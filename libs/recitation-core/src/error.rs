//! Error types for recitation-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when validating user-supplied values.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("surah number must be between 1 and 114, got {0}")]
    InvalidSurah(String),

    #[error("juz number must be between 1 and 30, got {0}")]
    InvalidJuz(String),

    #[error("threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("invalid prayer time {value:?} for {prayer}")]
    InvalidTime { prayer: String, value: String },

    #[error("page numbers start at 1")]
    InvalidPage,
}
