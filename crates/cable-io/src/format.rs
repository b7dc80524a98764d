//! Document format detection by file extension.

use std::path::Path;

use cable_core::{CableError, CableResult};

/// Serialization formats accepted for input documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub const ALL: &'static [DocumentFormat] = &[DocumentFormat::Json, DocumentFormat::Toml];

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Json => &["json"],
            DocumentFormat::Toml => &["toml"],
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Toml => "TOML",
        }
    }

    /// Detect the format from the file extension, case-insensitively.
    pub fn detect(path: &Path) -> Option<DocumentFormat> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Like [`detect`](Self::detect), but an unknown extension is an error.
    pub fn from_path(path: &Path) -> CableResult<DocumentFormat> {
        Self::detect(path).ok_or_else(|| {
            CableError::Parse(format!(
                "cannot determine format of '{}': expected a .json or .toml file",
                path.display()
            ))
        })
    }

    /// Deserialize a document of this format.
    pub fn parse<T: serde::de::DeserializeOwned>(&self, text: &str) -> CableResult<T> {
        match self {
            DocumentFormat::Json => serde_json::from_str(text)
                .map_err(|e| CableError::Parse(format!("invalid JSON: {e}"))),
            DocumentFormat::Toml => {
                toml::from_str(text).map_err(|e| CableError::Parse(format!("invalid TOML: {e}")))
            }
        }
    }
}
