//! The regression diff.
//!
//! Set-compares current findings against a baseline by stable content id
//! and classifies each delta. The tolerance mode moves only the severity
//! floor for calling a *new* finding a regression; fixed/improved
//! classification never depends on tolerance.

use rustc_hash::FxHashSet;

use vigil_core::{Baseline, RegressionComparison, ToleranceMode, VulnerabilityRecord};

/// Compare current findings against the most recent baseline.
///
/// With no baseline (first-ever run) every current finding is new and the
/// regression list is empty — first use must not report 100% regressions.
pub fn diff(
    current: &[VulnerabilityRecord],
    baseline: Option<&Baseline>,
    tolerance: ToleranceMode,
) -> RegressionComparison {
    let Some(baseline) = baseline else {
        return RegressionComparison {
            regressions: Vec::new(),
            improvements: Vec::new(),
            new_vulnerabilities: current.to_vec(),
            fixed_vulnerabilities: Vec::new(),
        };
    };

    let baseline_severity = baseline.severity_by_id();
    let current_ids: FxHashSet<&str> = current.iter().map(|v| v.id.as_str()).collect();
    let floor = tolerance.regression_floor();

    let mut comparison = RegressionComparison::default();

    for record in current {
        match baseline_severity.get(record.id.as_str()) {
            None => {
                comparison.new_vulnerabilities.push(record.clone());
                if record.severity.meets_floor(floor) {
                    comparison.regressions.push(record.clone());
                }
            }
            Some(previous) => {
                // Severity orders most severe first, so "worse" is "less".
                if record.severity < *previous {
                    comparison.regressions.push(record.clone());
                } else if record.severity > *previous {
                    comparison.improvements.push(record.clone());
                }
            }
        }
    }

    for record in &baseline.vulnerabilities {
        if !current_ids.contains(record.id.as_str()) {
            comparison.fixed_vulnerabilities.push(record.clone());
            comparison.improvements.push(record.clone());
        }
    }

    tracing::debug!(
        new = comparison.new_vulnerabilities.len(),
        fixed = comparison.fixed_vulnerabilities.len(),
        regressions = comparison.regressions.len(),
        %tolerance,
        "baseline diff computed"
    );

    comparison
}
