//! vigil-analysis: the security gate pipeline engines.
//!
//! Three independently testable components:
//! - `validate` — pure sanitization/validation of untrusted input
//! - `normalize` — heterogeneous scan output → canonical, deduplicated
//!   vulnerability records
//! - `baseline` — baseline snapshots and the regression diff
//! - `gates` — threshold rule evaluation into a pass/fail decision
//! - `report` — console and JSON report output
//!
//! Data flow: raw scanner documents → `normalize` (dedup + classify) →
//! `baseline::diff` → `gates::GateEvaluator` → `GateReport`. The `validate`
//! component stands alone, invoked wherever user-supplied data enters.
//!
//! All engines are synchronous, side-effect-free transformations over
//! immutable input; any number of pipeline invocations may run concurrently.

pub mod baseline;
pub mod gates;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod validate;

// Re-exports for convenience
pub use baseline::{diff, BaselineStore};
pub use gates::{
    GateContext, GateEvaluation, GateEvaluator, GateReport, GateViolation, GateWarning,
    SourceStatus, TestSummary,
};
pub use normalize::{deduplicate, normalize, SourceDocument};
pub use pipeline::{run, PipelineInput};
pub use report::{available_formats, create_reporter, Reporter};
