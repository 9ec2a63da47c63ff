//! Baseline snapshots.
//!
//! A baseline is an immutable, timestamped snapshot of accepted findings.
//! It is created explicitly by an operator action, read by every subsequent
//! regression run, and superseded (never mutated) by the next snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::VulnerabilityRecord;
use super::severity::Severity;
use super::source::SourceType;

/// Metadata recorded alongside a baseline snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Scan sources that contributed to this snapshot.
    pub sources: Vec<SourceType>,
    pub tool_version: String,
}

impl BaselineMetadata {
    pub fn new(sources: Vec<SourceType>) -> Self {
        Self {
            generated_at: Utc::now(),
            environment: None,
            sources,
            tool_version: crate::constants::VERSION.to_string(),
        }
    }
}

/// An immutable snapshot of previously accepted vulnerability findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Baseline {
    pub metadata: BaselineMetadata,
    pub vulnerabilities: Vec<VulnerabilityRecord>,
}

impl Baseline {
    pub fn new(metadata: BaselineMetadata, vulnerabilities: Vec<VulnerabilityRecord>) -> Self {
        Self {
            metadata,
            vulnerabilities,
        }
    }

    /// Index of finding id → severity, used by the differ.
    pub fn severity_by_id(&self) -> BTreeMap<&str, Severity> {
        self.vulnerabilities
            .iter()
            .map(|v| (v.id.as_str(), v.severity))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }
}
