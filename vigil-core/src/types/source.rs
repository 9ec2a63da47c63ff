//! Scan source types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four scan sources the pipeline ingests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    Dependency,
    StaticAnalysis,
    DynamicScan,
    Container,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dependency => "dependency",
            Self::StaticAnalysis => "static-analysis",
            Self::DynamicScan => "dynamic-scan",
            Self::Container => "container",
        }
    }

    pub fn all() -> &'static [SourceType] {
        &[
            Self::Dependency,
            Self::StaticAnalysis,
            Self::DynamicScan,
            Self::Container,
        ]
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
