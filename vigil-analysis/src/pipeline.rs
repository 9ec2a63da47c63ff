//! The full pipeline: normalize → dedup → diff → evaluate.
//!
//! A single synchronous pass over already-collected input. Loading the
//! scan documents, persisting the baseline, and acting on the report are
//! the caller's responsibility.

use std::collections::BTreeMap;

use vigil_core::{
    Baseline, Environment, ExceptionAllowlist, GateConfig, PipelineError, SourceError,
    SourceType, ToleranceMode, VigilErrorCode,
};

use crate::baseline::diff;
use crate::gates::{GateContext, GateEvaluator, GateReport, GateWarning, SourceStatus, TestSummary};
use crate::normalize::{normalize, SourceDocument};

/// Everything one evaluation run consumes.
#[derive(Debug, Default)]
pub struct PipelineInput<'a> {
    /// Successfully loaded scan documents.
    pub documents: Vec<SourceDocument>,
    /// Load failures, per source — these become coverage warnings.
    pub load_errors: Vec<SourceError>,
    pub baseline: Option<&'a Baseline>,
    pub allowlist: Option<&'a ExceptionAllowlist>,
    pub test_summary: Option<TestSummary>,
    pub tolerance: ToleranceMode,
}

/// Run the pipeline and produce the gate report.
pub fn run(input: PipelineInput<'_>, config: GateConfig, environment: Environment) -> GateReport {
    let mut source_status: BTreeMap<SourceType, SourceStatus> = BTreeMap::new();
    for document in &input.documents {
        source_status.insert(document.source_type, SourceStatus::Loaded);
    }
    for error in &input.load_errors {
        if let Some(source_type) = error.source_type() {
            let status = match error {
                SourceError::NotFound { .. } | SourceError::Io { .. } => SourceStatus::Missing,
                _ => SourceStatus::Unparseable,
            };
            source_status.insert(source_type, status);
        }
    }

    let normalized = normalize(&input.documents, input.allowlist);
    // Extraction failures demote the source from Loaded to Unparseable.
    for error in &normalized.errors {
        if let PipelineError::Source(source_error) = error {
            if let Some(source_type) = source_error.source_type() {
                source_status.insert(source_type, SourceStatus::Unparseable);
            }
        }
    }

    let comparison = diff(&normalized.data, input.baseline, input.tolerance);

    let context = GateContext {
        records: normalized.data,
        comparison,
        source_status,
        test_summary: input.test_summary,
    };

    let mut report = GateEvaluator::new(config, environment).evaluate(&context);

    // Load errors that did not map to a known source still surface.
    for error in input
        .load_errors
        .iter()
        .filter(|e| e.source_type().is_none())
    {
        report
            .warnings
            .push(GateWarning::config(error.code_string()));
    }

    report
}
