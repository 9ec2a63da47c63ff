//! Operator-maintained exception allowlist.
//!
//! Findings whose id appears here are marked `approved` by the normalizer
//! and excluded from gate threshold counts. They still appear in reports so
//! the audit artifact stays complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::errors::ConfigError;

/// One approved exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistEntry {
    /// The finding's stable content id.
    pub id: String,
    /// Why the finding is accepted.
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

/// The allowlist document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExceptionAllowlist {
    #[serde(default)]
    pub entries: Vec<AllowlistEntry>,
}

impl ExceptionAllowlist {
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// The approved id set, for bulk lookups.
    pub fn id_set(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn load(path: &Path) -> Result<ExceptionAllowlist, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
