//! Console reporter — human-readable output with color codes.

use crate::gates::{GateEvaluation, GateReport};

use super::Reporter;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn gate_symbol(&self, gate: &GateEvaluation) -> &'static str {
        if gate.passed {
            "✓"
        } else if gate.blocking {
            "✗"
        } else {
            "⚠"
        }
    }

    fn red(&self) -> &'static str {
        if self.use_color {
            "\x1b[31m"
        } else {
            ""
        }
    }

    fn yellow(&self) -> &'static str {
        if self.use_color {
            "\x1b[33m"
        } else {
            ""
        }
    }

    fn reset(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &GateReport) -> Result<String, String> {
        let mut output = String::new();

        output.push_str("╔══════════════════════════════════════════╗\n");
        output.push_str("║         Vigil Security Gate Report       ║\n");
        output.push_str("╚══════════════════════════════════════════╝\n\n");

        output.push_str(&format!(
            "Environment: {}    Evaluated: {}\n\n",
            report.environment,
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        ));

        for gate in &report.gates {
            output.push_str(&format!(
                "{} {} — actual {} (threshold {})\n",
                self.gate_symbol(gate),
                gate.gate_id,
                gate.actual,
                gate.threshold,
            ));
            if !gate.passed {
                output.push_str(&format!("    {}\n", gate.message));
            }
        }
        output.push('\n');

        for violation in &report.violations {
            output.push_str(&format!(
                "  {}violation:{} {}\n",
                self.red(),
                self.reset(),
                violation.message,
            ));
        }
        for warning in &report.warnings {
            output.push_str(&format!(
                "  {}warning:{} {}\n",
                self.yellow(),
                self.reset(),
                warning.message,
            ));
        }

        if !report.recommendations.is_empty() {
            output.push('\n');
            for recommendation in &report.recommendations {
                output.push_str(&format!("  → {recommendation}\n"));
            }
        }

        output.push_str(&format!("\n─── {} ───\n", report.summary()));
        if report.passed {
            output.push_str("Result: PASSED ✓\n");
        } else {
            output.push_str("Result: FAILED ✗\n");
        }

        Ok(output)
    }
}
