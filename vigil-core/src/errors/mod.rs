//! Error taxonomy for the Vigil pipeline.
//!
//! Each subsystem owns one error enum; every enum implements
//! [`VigilErrorCode`] so callers get a stable machine-readable code string
//! alongside the human-readable message. The top-level [`PipelineError`]
//! aggregates them, and [`PipelineResult`] lets a partial pipeline failure
//! still yield data plus the collected errors instead of aborting the run.

pub mod baseline_error;
pub mod config_error;
pub mod error_code;
pub mod gate_error;
pub mod source_error;
pub mod validation_error;

pub use baseline_error::BaselineError;
pub use config_error::ConfigError;
pub use error_code::VigilErrorCode;
pub use gate_error::GateError;
pub use source_error::SourceError;
pub use validation_error::ValidationError;

/// Top-level pipeline error: any subsystem error, unified.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Baseline(#[from] BaselineError),
}

impl VigilErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Gate(e) => e.error_code(),
            Self::Baseline(e) => e.error_code(),
        }
    }
}

/// A result that carries data alongside non-fatal errors.
///
/// Source and evaluation errors propagate into the report as warnings or
/// violations rather than crashing the run; this type is how they travel.
#[derive(Debug)]
pub struct PipelineResult<T> {
    pub data: T,
    pub errors: Vec<PipelineError>,
}

impl<T> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Map the data, keeping the accumulated errors.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PipelineResult<U> {
        PipelineResult {
            data: f(self.data),
            errors: self.errors,
        }
    }

    /// Fold another result's errors into this one, returning its data.
    pub fn absorb<U>(&mut self, other: PipelineResult<U>) -> U {
        self.errors.extend(other.errors);
        other.data
    }
}
