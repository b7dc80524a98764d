//! Unified error types for the cable rating workspace
//!
//! This module provides a common error type [`CableError`] that can represent
//! errors from any part of the system: table lookups inside the rating engine,
//! parameter validation, and file loading at the edges.
//!
//! # Example
//!
//! ```ignore
//! use cable_core::{CableError, CableResult};
//!
//! fn rate_from_file(path: &str) -> CableResult<CableRatingResult> {
//!     let params = load_parameters(path)?;
//!     compute_rating(&tables, &params)
//! }
//! ```

use thiserror::Error;

/// Unified error type for all cable rating operations.
///
/// The first three variants are the rating engine's own taxonomy; the rest
/// cover I/O and configuration at the crate boundaries.
#[derive(Error, Debug)]
pub enum CableError {
    /// A lookup partition required by the calculation is absent from the tables
    #[error("Missing table data: {key}")]
    MissingTableData { key: String },

    /// The conductor size is not listed for the cable construction
    #[error("Unsupported size: {size} mm² is not listed for {construction} cables")]
    UnsupportedSize { size: f64, construction: String },

    /// A parameter is non-numeric or outside its valid range
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

impl CableError {
    pub fn missing(key: impl Into<String>) -> Self {
        CableError::MissingTableData { key: key.into() }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CableError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            CableError::MissingTableData { .. } => "MissingTableData",
            CableError::UnsupportedSize { .. } => "UnsupportedSize",
            CableError::InvalidInput { .. } => "InvalidInput",
            CableError::Io(_) => "Io",
            CableError::Parse(_) => "Parse",
            CableError::Config(_) => "Config",
            CableError::Other(_) => "Other",
        }
    }
}

/// Convenience type alias for Results using CableError.
pub type CableResult<T> = Result<T, CableError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for CableError {
    fn from(err: anyhow::Error) -> Self {
        CableError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for CableError {
    fn from(s: String) -> Self {
        CableError::Other(s)
    }
}

impl From<&str> for CableError {
    fn from(s: &str) -> Self {
        CableError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for CableError {
    fn from(err: serde_json::Error) -> Self {
        CableError::Parse(err.to_string())
    }
}
