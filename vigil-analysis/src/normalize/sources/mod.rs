//! Source-specific extractors.
//!
//! One module per scan source, each speaking that scanner's own field
//! vocabulary: dependency audit (npm-audit-shaped), static analysis
//! (semgrep-shaped), dynamic scan (ZAP-shaped), container scan
//! (trivy-shaped). Documents are consumed read-only.

pub mod container;
pub mod dependency;
pub mod dynamic_scan;
pub mod static_analysis;

use serde_json::Value;
use vigil_core::{SourceError, SourceType};

/// A string field, if present and a string.
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// A u32 field, accepting either a JSON number or a numeric string
/// (scanners disagree on which).
pub(crate) fn u32_field(value: &Value, key: &str) -> Option<u32> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn shape_error(source_type: SourceType, message: impl Into<String>) -> SourceError {
    SourceError::UnexpectedShape {
        source_type,
        message: message.into(),
    }
}
