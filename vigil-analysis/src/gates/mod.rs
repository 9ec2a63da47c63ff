//! Gate evaluation — thresholds, blocking semantics, and the final
//! pass/fail decision.

pub mod evaluator;
pub mod types;

pub use evaluator::GateEvaluator;
pub use types::{
    GateContext, GateEvaluation, GateReport, GateViolation, GateWarning, SourceStatus,
    TestSummary,
};
