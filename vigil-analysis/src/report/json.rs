//! JSON reporter — the machine-readable audit artifact.

use crate::gates::GateReport;

use super::Reporter;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &GateReport) -> Result<String, String> {
        serde_json::to_string_pretty(report).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vigil_core::Environment;

    #[test]
    fn report_round_trips() {
        let report = GateReport {
            timestamp: Utc::now(),
            environment: Environment::Production,
            passed: true,
            gates: Vec::new(),
            violations: Vec::new(),
            warnings: Vec::new(),
            recommendations: vec!["No action required.".to_string()],
        };

        let json = JsonReporter.generate(&report).unwrap();
        let back: GateReport = serde_json::from_str(&json).unwrap();
        assert!(back.passed);
        assert_eq!(back.environment, Environment::Production);
        assert_eq!(back.recommendations, report.recommendations);
    }
}
