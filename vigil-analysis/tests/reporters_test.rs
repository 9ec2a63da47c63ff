//! Reporter output tests.

use chrono::Utc;

use vigil_analysis::gates::{GateEvaluation, GateReport, GateViolation, GateWarning};
use vigil_analysis::report::{available_formats, create_reporter};
use vigil_core::{Environment, GateId, Threshold};

fn failing_report() -> GateReport {
    GateReport {
        timestamp: Utc::now(),
        environment: Environment::Production,
        passed: false,
        gates: vec![
            GateEvaluation {
                gate_id: GateId::CriticalVulnerabilities,
                name: "Critical vulnerabilities".into(),
                passed: false,
                blocking: true,
                actual: 2.0,
                threshold: Threshold::Max(0.0),
                message: "Critical vulnerabilities: 2 violates threshold <= 0".into(),
            },
            GateEvaluation {
                gate_id: GateId::TestCoverage,
                name: "Test coverage".into(),
                passed: true,
                blocking: false,
                actual: 91.0,
                threshold: Threshold::Min(80.0),
                message: "Test coverage: 91 within threshold >= 80".into(),
            },
        ],
        violations: vec![GateViolation {
            gate_id: GateId::CriticalVulnerabilities,
            message: "Critical vulnerabilities: 2 violates threshold <= 0".into(),
            actual: 2.0,
            threshold: Threshold::Max(0.0),
        }],
        warnings: vec![GateWarning::config("gate config fell back to the built-in default")],
        recommendations: vec!["Resolve 2 critical finding(s) before deploying.".into()],
    }
}

#[test]
fn test_every_advertised_format_has_a_reporter() {
    for format in available_formats() {
        let reporter = create_reporter(format).unwrap();
        assert_eq!(&reporter.name(), format);
    }
    assert!(create_reporter("html").is_none());
}

#[test]
fn test_console_output_carries_the_verdict() {
    let output = create_reporter("console")
        .unwrap()
        .generate(&failing_report())
        .unwrap();

    assert!(output.contains("FAILED"));
    assert!(output.contains("critical-vulnerabilities"));
    assert!(output.contains("violation:"));
    assert!(output.contains("→ Resolve 2 critical finding(s)"));
    assert!(output.contains("production"));
}

#[test]
fn test_console_output_without_color_has_no_escapes() {
    use vigil_analysis::report::console::ConsoleReporter;
    use vigil_analysis::report::Reporter;

    let output = ConsoleReporter::new(false)
        .generate(&failing_report())
        .unwrap();
    assert!(!output.contains('\x1b'));
}

#[test]
fn test_json_output_is_the_audit_document() {
    let output = create_reporter("json")
        .unwrap()
        .generate(&failing_report())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["passed"], serde_json::json!(false));
    assert_eq!(value["violations"].as_array().unwrap().len(), 1);
    assert_eq!(
        value["violations"][0]["gate_id"],
        serde_json::json!("critical-vulnerabilities")
    );
    assert_eq!(
        value["violations"][0]["threshold"],
        serde_json::json!({ "max": 0.0 })
    );
    assert!(value["timestamp"].is_string());
}

#[test]
fn test_summary_line_counts() {
    let report = failing_report();
    let summary = report.summary();
    assert!(summary.contains("1/2 gates passed"));
    assert!(summary.contains("1 violation(s)"));
    assert!(summary.contains("FAILED"));
}
