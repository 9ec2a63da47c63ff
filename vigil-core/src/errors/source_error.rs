//! Scan source ingestion errors.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};
use crate::types::SourceType;

/// Errors that can occur loading or parsing a scan source document.
///
/// These are never fatal to a gate run: the affected source contributes
/// zero findings and the error surfaces as a coverage warning in the
/// report, so a missing document cannot masquerade as a passing scan.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Scan document not found for {source_type}: {path}")]
    NotFound {
        source_type: SourceType,
        path: PathBuf,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unparseable {source_type} document: {message}")]
    Unparseable {
        source_type: SourceType,
        message: String,
    },

    #[error("Unexpected shape in {source_type} document: {message}")]
    UnexpectedShape {
        source_type: SourceType,
        message: String,
    },
}

impl SourceError {
    /// The source this error belongs to, when known.
    pub fn source_type(&self) -> Option<SourceType> {
        match self {
            Self::NotFound { source_type, .. }
            | Self::Unparseable { source_type, .. }
            | Self::UnexpectedShape { source_type, .. } => Some(*source_type),
            Self::Io { .. } => None,
        }
    }
}

impl VigilErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } | Self::Io { .. } => error_code::SOURCE_UNAVAILABLE,
            Self::Unparseable { .. } | Self::UnexpectedShape { .. } => error_code::SOURCE_PARSE,
        }
    }
}
