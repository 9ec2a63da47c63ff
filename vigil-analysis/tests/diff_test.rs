//! Regression diff tests.

use vigil_analysis::baseline::diff;
use vigil_core::{
    Baseline, BaselineMetadata, RegressionComparison, Severity, SourceType, ToleranceMode,
    VulnerabilityRecord,
};

fn record(source: &str, title: &str, severity: Severity) -> VulnerabilityRecord {
    VulnerabilityRecord::new(SourceType::Dependency, severity, title, "", source)
}

fn baseline_of(records: Vec<VulnerabilityRecord>) -> Baseline {
    Baseline::new(BaselineMetadata::new(vec![SourceType::Dependency]), records)
}

fn ids(records: &[VulnerabilityRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Baseline {A(high), B(medium)} vs current {A(high), C(critical)}:
/// new=[C], regressions=[C], fixed=[B], improvements=[B].
#[test]
fn test_canonical_diff_scenario() {
    let a = record("pkg-a", "finding A", Severity::High);
    let b = record("pkg-b", "finding B", Severity::Medium);
    let c = record("pkg-c", "finding C", Severity::Critical);

    let baseline = baseline_of(vec![a.clone(), b.clone()]);
    let current = vec![a.clone(), c.clone()];

    let comparison = diff(&current, Some(&baseline), ToleranceMode::Moderate);

    assert_eq!(ids(&comparison.new_vulnerabilities), vec![c.id.as_str()]);
    assert_eq!(ids(&comparison.regressions), vec![c.id.as_str()]);
    assert_eq!(ids(&comparison.fixed_vulnerabilities), vec![b.id.as_str()]);
    assert_eq!(ids(&comparison.improvements), vec![b.id.as_str()]);
}

#[test]
fn test_first_run_produces_no_regressions() {
    let current = vec![
        record("pkg-a", "finding A", Severity::Critical),
        record("pkg-b", "finding B", Severity::High),
        record("pkg-c", "finding C", Severity::Low),
    ];

    for tolerance in [
        ToleranceMode::Strict,
        ToleranceMode::Moderate,
        ToleranceMode::Lenient,
    ] {
        let comparison: RegressionComparison = diff(&current, None, tolerance);
        assert!(comparison.regressions.is_empty(), "{tolerance} regressed");
        assert_eq!(comparison.new_vulnerabilities.len(), 3);
        assert!(comparison.fixed_vulnerabilities.is_empty());
        assert!(comparison.improvements.is_empty());
    }
}

#[test]
fn test_tolerance_floor_only_affects_new_findings() {
    let new_medium = record("pkg-m", "medium finding", Severity::Medium);
    let baseline = baseline_of(vec![]);
    let current = vec![new_medium];

    // Moderate: a new medium is not a regression.
    let moderate = diff(&current, Some(&baseline), ToleranceMode::Moderate);
    assert!(moderate.regressions.is_empty());
    assert_eq!(moderate.new_vulnerabilities.len(), 1);

    // Strict: the same new medium is a regression.
    let strict = diff(&current, Some(&baseline), ToleranceMode::Strict);
    assert_eq!(strict.regressions.len(), 1);

    // Lenient: only critical counts.
    let lenient = diff(&current, Some(&baseline), ToleranceMode::Lenient);
    assert!(lenient.regressions.is_empty());
}

#[test]
fn test_new_critical_exceeds_every_tolerance_floor() {
    let critical = record("pkg-x", "critical finding", Severity::Critical);
    let baseline = baseline_of(vec![]);

    for tolerance in [
        ToleranceMode::Strict,
        ToleranceMode::Moderate,
        ToleranceMode::Lenient,
    ] {
        let comparison = diff(std::slice::from_ref(&critical), Some(&baseline), tolerance);
        assert_eq!(comparison.regressions.len(), 1, "{tolerance}");
    }
}

#[test]
fn test_severity_increase_is_a_regression() {
    let before = record("pkg-a", "finding A", Severity::Low);
    let mut after = before.clone();
    after.severity = Severity::High;

    let baseline = baseline_of(vec![before]);
    let comparison = diff(&[after.clone()], Some(&baseline), ToleranceMode::Moderate);

    assert_eq!(ids(&comparison.regressions), vec![after.id.as_str()]);
    assert!(comparison.new_vulnerabilities.is_empty());
    assert!(comparison.improvements.is_empty());
}

#[test]
fn test_severity_decrease_is_an_improvement() {
    let before = record("pkg-a", "finding A", Severity::Critical);
    let mut after = before.clone();
    after.severity = Severity::Medium;

    let baseline = baseline_of(vec![before]);
    let comparison = diff(&[after.clone()], Some(&baseline), ToleranceMode::Moderate);

    assert_eq!(ids(&comparison.improvements), vec![after.id.as_str()]);
    assert!(comparison.regressions.is_empty());
    assert!(comparison.fixed_vulnerabilities.is_empty());
}

#[test]
fn test_fixed_classification_ignores_tolerance() {
    // A fixed low-severity finding is an improvement under every mode.
    let fixed = record("pkg-gone", "was here", Severity::Low);
    let baseline = baseline_of(vec![fixed.clone()]);

    for tolerance in [
        ToleranceMode::Strict,
        ToleranceMode::Moderate,
        ToleranceMode::Lenient,
    ] {
        let comparison = diff(&[], Some(&baseline), tolerance);
        assert_eq!(ids(&comparison.fixed_vulnerabilities), vec![fixed.id.as_str()]);
        assert_eq!(ids(&comparison.improvements), vec![fixed.id.as_str()]);
    }
}

#[test]
fn test_unchanged_findings_produce_empty_diff() {
    let a = record("pkg-a", "finding A", Severity::High);
    let baseline = baseline_of(vec![a.clone()]);
    let comparison = diff(&[a], Some(&baseline), ToleranceMode::Strict);

    assert!(comparison.regressions.is_empty());
    assert!(comparison.improvements.is_empty());
    assert!(comparison.new_vulnerabilities.is_empty());
    assert!(comparison.fixed_vulnerabilities.is_empty());
}
