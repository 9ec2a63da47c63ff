//! The gate evaluator.
//!
//! Stateless per invocation: resolves the effective config for the target
//! environment, computes each enabled gate's `actual` from the aggregated
//! context, and folds the results into a single pass/fail decision. A
//! failing blocking gate becomes a violation; a failing non-blocking gate
//! becomes a warning; warnings never flip the overall result.

use chrono::Utc;

use vigil_core::{Environment, GateConfig, GateError, GateId, GateRule, Severity};

use super::types::{
    GateContext, GateEvaluation, GateReport, GateViolation, GateWarning, SourceStatus,
};

pub struct GateEvaluator {
    config: GateConfig,
    environment: Environment,
}

impl GateEvaluator {
    pub fn new(config: GateConfig, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Evaluate every enabled gate against the context.
    pub fn evaluate(&self, context: &GateContext) -> GateReport {
        let effective = self.config.resolve_for(self.environment);

        let mut gates = Vec::with_capacity(effective.len());
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        // Missing or unparseable sources are flagged before any gate math:
        // zero findings from a source must never read as "source passed".
        for (source_type, status) in &context.source_status {
            if *status != SourceStatus::Loaded {
                warnings.push(GateWarning::coverage(*source_type, *status));
            }
        }

        for (gate_id, rule) in &effective {
            if !rule.enabled {
                tracing::debug!(gate = %gate_id, "gate disabled, skipping");
                continue;
            }

            let evaluation = match self.evaluate_gate(*gate_id, rule, context) {
                Ok(evaluation) => evaluation,
                // Fail closed: an unevaluable gate is a failing gate.
                Err(error) => GateEvaluation {
                    gate_id: *gate_id,
                    name: rule.name.clone(),
                    passed: false,
                    blocking: rule.blocking,
                    actual: 0.0,
                    threshold: rule.threshold,
                    message: format!("{}: failed closed ({error})", rule.name),
                },
            };

            if !evaluation.passed {
                if evaluation.blocking {
                    violations.push(GateViolation {
                        gate_id: evaluation.gate_id,
                        message: evaluation.message.clone(),
                        actual: evaluation.actual,
                        threshold: evaluation.threshold,
                    });
                } else {
                    warnings.push(GateWarning::gate(
                        evaluation.gate_id,
                        evaluation.message.clone(),
                    ));
                }
            }
            gates.push(evaluation);
        }

        let passed = violations.is_empty();
        let recommendations = build_recommendations(context, &violations, &warnings);

        tracing::info!(
            environment = %self.environment,
            passed,
            violations = violations.len(),
            warnings = warnings.len(),
            "gate evaluation complete"
        );

        GateReport {
            timestamp: Utc::now(),
            environment: self.environment,
            passed,
            gates,
            violations,
            warnings,
            recommendations,
        }
    }

    fn evaluate_gate(
        &self,
        gate_id: GateId,
        rule: &GateRule,
        context: &GateContext,
    ) -> Result<GateEvaluation, GateError> {
        let actual = match gate_id {
            GateId::CriticalVulnerabilities => {
                context.severity_count(Severity::Critical, &rule.sources) as f64
            }
            GateId::HighVulnerabilities => {
                context.severity_count(Severity::High, &rule.sources) as f64
            }
            GateId::MediumVulnerabilities => {
                context.severity_count(Severity::Medium, &rule.sources) as f64
            }
            GateId::SecurityRegressions => context.regression_count() as f64,
            GateId::TestCoverage => {
                let summary = context.test_summary.as_ref().ok_or_else(|| {
                    GateError::MissingSummary {
                        gate: gate_id.to_string(),
                    }
                })?;
                if !summary.coverage_percent.is_finite() {
                    return Err(GateError::EvaluationFailed {
                        gate: gate_id.to_string(),
                        message: "coverage percent is not a finite number".to_string(),
                    });
                }
                summary.coverage_percent
            }
            GateId::ScanCoverage => context.sources_loaded() as f64,
        };

        let mut passed = rule.threshold.satisfied_by(actual);
        let mut message = format!(
            "{}: {} {} threshold {}",
            rule.name,
            actual,
            if passed { "within" } else { "violates" },
            rule.threshold,
        );

        // The test-coverage gate also requires its configured suites to be
        // present, independent of the numeric threshold.
        if gate_id == GateId::TestCoverage && !rule.required_tests.is_empty() {
            let summary = context
                .test_summary
                .as_ref()
                .expect("summary presence checked above");
            let missing: Vec<&str> = rule
                .required_tests
                .iter()
                .filter(|required| !summary.available_suites.contains(required))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                passed = false;
                message = format!(
                    "{}: required test suite(s) absent: {}",
                    rule.name,
                    missing.join(", "),
                );
            }
        }

        Ok(GateEvaluation {
            gate_id,
            name: rule.name.clone(),
            passed,
            blocking: rule.blocking,
            actual,
            threshold: rule.threshold,
            message,
        })
    }
}

fn build_recommendations(
    context: &GateContext,
    violations: &[GateViolation],
    warnings: &[GateWarning],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let critical = context.severity_count(Severity::Critical, &[]);
    if critical > 0 {
        recommendations.push(format!(
            "Resolve {critical} critical finding(s) before deploying."
        ));
    }

    let regressions = context.regression_count();
    if regressions > 0 {
        recommendations.push(format!(
            "Investigate {regressions} regression(s) against the baseline; regenerate the baseline once the findings are accepted or fixed."
        ));
    }

    for warning in warnings {
        if warning.code == "coverage" {
            recommendations.push(format!("Re-run the affected scanner: {}", warning.message));
        }
    }

    if recommendations.is_empty() && violations.is_empty() {
        recommendations.push("No action required.".to_string());
    }

    recommendations
}
