//! Core data model: severity vocabulary, source types, normalized records,
//! baselines, and regression comparisons.

pub mod baseline;
pub mod comparison;
pub mod record;
pub mod severity;
pub mod source;

pub use baseline::{Baseline, BaselineMetadata};
pub use comparison::{RegressionComparison, ToleranceMode};
pub use record::{content_id, VulnerabilityRecord};
pub use severity::Severity;
pub use source::SourceType;
