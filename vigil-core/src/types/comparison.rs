//! Regression comparison output and tolerance modes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::VulnerabilityRecord;
use super::severity::Severity;

/// Severity floor for classifying a *new* finding as a regression.
///
/// The floor applies only to new findings; fixed/improved classification is
/// unaffected by tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToleranceMode {
    /// New findings at Medium or above are regressions.
    Strict,
    /// New findings at High or above are regressions.
    #[default]
    Moderate,
    /// Only new Critical findings are regressions.
    Lenient,
}

impl ToleranceMode {
    /// The severity a new finding must meet to count as a regression.
    pub fn regression_floor(&self) -> Severity {
        match self {
            Self::Strict => Severity::Medium,
            Self::Moderate => Severity::High,
            Self::Lenient => Severity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Moderate => "moderate",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for ToleranceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The delta between a current finding set and a baseline.
///
/// Derived, never stored: computed fresh on every regression run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegressionComparison {
    /// New findings above the tolerance floor, plus findings whose severity
    /// increased since the baseline.
    pub regressions: Vec<VulnerabilityRecord>,
    /// Fixed findings, plus findings whose severity decreased.
    pub improvements: Vec<VulnerabilityRecord>,
    /// Present now, absent from the baseline.
    pub new_vulnerabilities: Vec<VulnerabilityRecord>,
    /// Present in the baseline, absent now.
    pub fixed_vulnerabilities: Vec<VulnerabilityRecord>,
}

impl RegressionComparison {
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }

    pub fn regression_count(&self) -> usize {
        self.regressions.len()
    }
}
