//! Normalized vulnerability records and the stable content id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use super::severity::Severity;
use super::source::SourceType;

/// One finding, normalized from any scan source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    /// Stable content hash; identical findings hash identically across runs.
    pub id: String,
    pub source_type: SourceType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// File, package, or URL identifying where the finding lives.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss: Option<f64>,
    /// True when the id is on the operator exception allowlist.
    #[serde(default)]
    pub approved: bool,
    /// First detection in this baseline lineage.
    pub first_seen: DateTime<Utc>,
}

impl VulnerabilityRecord {
    /// Construct a record, deriving its id from the identity tuple.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_type: SourceType,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let source = source.into();
        Self {
            id: content_id(source_type, &source, &title),
            source_type,
            severity,
            title,
            description: description.into(),
            source,
            line: None,
            column: None,
            cwe: None,
            cvss: None,
            approved: false,
            first_seen: Utc::now(),
        }
    }
}

/// Stable content hash over the identity tuple
/// `(source_type, source, title-or-rule-id)`.
///
/// Fields are trimmed, inner whitespace runs collapsed, and case folded
/// before hashing, so incidental formatting differences between scan runs
/// never split a finding's identity.
pub fn content_id(source_type: SourceType, source: &str, title: &str) -> String {
    let mut buf = String::with_capacity(source.len() + title.len() + 24);
    buf.push_str(source_type.as_str());
    buf.push('|');
    push_canonical(&mut buf, source);
    buf.push('|');
    push_canonical(&mut buf, title);
    format!("{:016x}", xxh3_64(buf.as_bytes()))
}

fn push_canonical(buf: &mut String, field: &str) {
    let mut first = true;
    for word in field.split_whitespace() {
        if !first {
            buf.push(' ');
        }
        for c in word.chars() {
            buf.extend(c.to_lowercase());
        }
        first = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_id() {
        let a = content_id(SourceType::Dependency, "lodash", "Prototype Pollution");
        let b = content_id(SourceType::Dependency, "lodash", "Prototype Pollution");
        assert_eq!(a, b);
    }

    #[test]
    fn whitespace_and_case_insensitive() {
        let a = content_id(SourceType::StaticAnalysis, "src/api.ts", "sql-injection");
        let b = content_id(SourceType::StaticAnalysis, "  src/api.ts ", "SQL-Injection\n");
        assert_eq!(a, b);
    }

    #[test]
    fn source_type_is_part_of_identity() {
        let a = content_id(SourceType::Dependency, "express", "ReDoS");
        let b = content_id(SourceType::Container, "express", "ReDoS");
        assert_ne!(a, b);
    }

    #[test]
    fn id_is_fixed_width_hex() {
        let id = content_id(SourceType::DynamicScan, "https://app/login", "XSS");
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
