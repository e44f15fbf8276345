//! Error types for translation and export operations.

use thiserror::Error;

/// Errors that can occur while translating declarations or exporting the model.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// One compilation unit failed to parse upstream.
    #[error("parse failure in unit '{unit}': {message}")]
    Parse { unit: String, message: String },

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error at the export boundary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export sink rejected the document.
    #[error("export error: {0}")]
    Export(String),
}

impl TranslateError {
    /// Create a parse failure error for a named unit.
    pub fn parse(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Create an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }
}

/// A per-unit failure collected during a run.
///
/// Unit failures never abort the pipeline; they are surfaced to the caller
/// alongside the otherwise-complete model.
#[derive(Debug)]
pub struct UnitFailure {
    /// The unit's name (usually the file path handed in by the caller).
    pub unit: String,
    /// What went wrong.
    pub error: TranslateError,
}
