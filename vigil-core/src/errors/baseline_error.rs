//! Baseline persistence errors.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur reading or writing a baseline snapshot.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("Baseline not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error on baseline {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Baseline parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl VigilErrorCode for BaselineError {
    fn error_code(&self) -> &'static str {
        error_code::BASELINE_ERROR
    }
}
