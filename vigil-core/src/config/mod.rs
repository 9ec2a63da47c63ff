//! Gate configuration: rule table, environment overrides, exception allowlist.

pub mod allowlist;
pub mod environment;
pub mod gate_config;

pub use allowlist::{AllowlistEntry, ExceptionAllowlist};
pub use environment::Environment;
pub use gate_config::{GateConfig, GateId, GateRule, GateRuleOverride, Threshold};
