//! Error types for the portfolio behaviors
//!
//! Page behaviors themselves never fail: a missing element is a silent no-op.
//! Errors only exist where configuration enters the system and where a
//! browser capability is missing.

use thiserror::Error;

/// Main error type for folio operations
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration parsed but is not usable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// The host page lacks a capability (e.g. intersection observation)
    #[error("Unsupported capability: {0}")]
    Unsupported(&'static str),
}

/// Result type alias using FolioError
pub type FolioResult<T> = Result<T, FolioError>;
