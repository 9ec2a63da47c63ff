//! Gate evaluation errors.

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur during gate evaluation.
///
/// An `EvaluationFailed` gate fails closed: the gate is treated as failing,
/// never as passing.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Gate evaluation failed for {gate}: {message}")]
    EvaluationFailed { gate: String, message: String },

    #[error("Required scan summary missing for gate {gate}")]
    MissingSummary { gate: String },

    #[error("Unknown gate id: {0}")]
    UnknownGate(String),
}

impl VigilErrorCode for GateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EvaluationFailed { .. } => error_code::EVALUATION_ERROR,
            _ => error_code::GATE_FAILED,
        }
    }
}
