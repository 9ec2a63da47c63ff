//! vigil-core: shared foundation for the Vigil security gate pipeline.
//!
//! This crate carries everything the analysis crates agree on:
//! - Types: canonical severity levels, scan source types, normalized
//!   vulnerability records, baselines, and regression comparisons
//! - Errors: per-subsystem error enums with stable machine-readable codes
//! - Config: the declarative gate rule table with environment overrides
//! - Tracing: logging initialization and conventions
//! - Constants: shared defaults and limits

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-exports for convenience
pub use config::{
    AllowlistEntry, Environment, ExceptionAllowlist, GateConfig, GateId, GateRule,
    GateRuleOverride, Threshold,
};
pub use errors::{
    BaselineError, ConfigError, GateError, PipelineError, PipelineResult, SourceError,
    ValidationError, VigilErrorCode,
};
pub use types::{
    content_id, Baseline, BaselineMetadata, RegressionComparison, Severity, SourceType,
    ToleranceMode, VulnerabilityRecord,
};
