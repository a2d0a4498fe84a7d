//! Error types for wiring plans

use crate::validate::PlanReport;
use std::path::PathBuf;

/// Plan loading, validation and rendering errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// File could not be read or written
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Plan or config text is not valid TOML for the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Plan parsed but failed validation
    #[error("invalid plan: {} problem(s)", .0.diagnostics.len())]
    Invalid(PlanReport),

    /// Output could not be produced
    #[error("render error: {0}")]
    Render(String),
}

impl PlanError {
    /// Check if the plan was rejected by validation
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Validation report, when the plan was rejected by validation
    #[must_use]
    pub fn report(&self) -> Option<&PlanReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(error: serde_json::Error) -> Self {
        Self::Render(error.to_string())
    }
}
