//! Core types for gate evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use vigil_core::{
    Environment, GateId, RegressionComparison, Severity, SourceType, Threshold,
    VulnerabilityRecord,
};

/// Whether a scan source's document made it into this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Loaded,
    Missing,
    Unparseable,
}

/// Test tooling summary for the test-coverage gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub coverage_percent: f64,
    /// Test suites that actually ran (e.g. "unit", "integration").
    pub available_suites: Vec<String>,
}

/// Aggregated input for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct GateContext {
    /// Current findings, normalized and deduplicated.
    pub records: Vec<VulnerabilityRecord>,
    /// Delta against the baseline.
    pub comparison: RegressionComparison,
    /// Per-source document status.
    pub source_status: BTreeMap<SourceType, SourceStatus>,
    /// Test summary, when the caller has one.
    pub test_summary: Option<TestSummary>,
}

impl GateContext {
    /// Count unapproved findings at a severity across the given sources.
    /// An empty source list means "all sources".
    pub fn severity_count(&self, severity: Severity, sources: &[SourceType]) -> usize {
        self.records
            .iter()
            .filter(|r| !r.approved && r.severity == severity)
            .filter(|r| sources.is_empty() || sources.contains(&r.source_type))
            .count()
    }

    /// Count unapproved regressions.
    pub fn regression_count(&self) -> usize {
        self.comparison
            .regressions
            .iter()
            .filter(|r| !r.approved)
            .count()
    }

    /// Number of sources whose documents loaded.
    pub fn sources_loaded(&self) -> usize {
        self.source_status
            .values()
            .filter(|s| **s == SourceStatus::Loaded)
            .count()
    }
}

/// One gate's evaluation: actual vs threshold plus a readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateEvaluation {
    pub gate_id: GateId,
    pub name: String,
    pub passed: bool,
    pub blocking: bool,
    pub actual: f64,
    pub threshold: Threshold,
    pub message: String,
}

/// A failed blocking gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateViolation {
    pub gate_id: GateId,
    pub message: String,
    pub actual: f64,
    pub threshold: Threshold,
}

/// An advisory: a failed non-blocking gate, a coverage gap, or a config
/// fallback. Never flips the overall result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_id: Option<GateId>,
    pub code: String,
    pub message: String,
}

impl GateWarning {
    pub fn coverage(source_type: SourceType, status: SourceStatus) -> Self {
        let what = match status {
            SourceStatus::Missing => "missing",
            SourceStatus::Unparseable => "unparseable",
            SourceStatus::Loaded => "loaded",
        };
        Self {
            gate_id: None,
            code: "coverage".to_string(),
            message: format!(
                "{source_type} scan document was {what}; treated as zero findings, not as a pass"
            ),
        }
    }

    pub fn gate(gate_id: GateId, message: impl Into<String>) -> Self {
        Self {
            gate_id: Some(gate_id),
            code: "gate".to_string(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self {
            gate_id: None,
            code: "config".to_string(),
            message: message.into(),
        }
    }
}

/// The full evaluation output: the audit artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateReport {
    pub timestamp: DateTime<Utc>,
    pub environment: Environment,
    pub passed: bool,
    pub gates: Vec<GateEvaluation>,
    pub violations: Vec<GateViolation>,
    pub warnings: Vec<GateWarning>,
    pub recommendations: Vec<String>,
}

impl GateReport {
    /// One-paragraph human-readable summary.
    pub fn summary(&self) -> String {
        let gates_passed = self.gates.iter().filter(|g| g.passed).count();
        let verdict = if self.passed {
            "PASSED"
        } else {
            "FAILED — deployment blocked"
        };
        format!(
            "Security gate {} for {}: {}/{} gates passed, {} violation(s), {} warning(s).",
            verdict,
            self.environment,
            gates_passed,
            self.gates.len(),
            self.violations.len(),
            self.warnings.len(),
        )
    }
}
