//! Dependency audit extractor (npm-audit-shaped JSON).
//!
//! Understands both report generations: the v2 `vulnerabilities` map
//! (package name → advisory summary with `via` entries) and the legacy v1
//! `advisories` map (advisory id → advisory).

use serde_json::Value;

use vigil_core::{Severity, SourceError, SourceType, VulnerabilityRecord};

use super::{shape_error, str_field};

const SOURCE: SourceType = SourceType::Dependency;

pub fn extract(raw: &Value) -> Result<Vec<VulnerabilityRecord>, SourceError> {
    if let Some(vulnerabilities) = raw.get("vulnerabilities") {
        let map = vulnerabilities
            .as_object()
            .ok_or_else(|| shape_error(SOURCE, "'vulnerabilities' is not an object"))?;
        return Ok(map.values().filter_map(extract_v2_entry).collect());
    }

    if let Some(advisories) = raw.get("advisories") {
        let map = advisories
            .as_object()
            .ok_or_else(|| shape_error(SOURCE, "'advisories' is not an object"))?;
        return Ok(map.values().filter_map(extract_v1_advisory).collect());
    }

    Err(shape_error(
        SOURCE,
        "expected a 'vulnerabilities' or 'advisories' map",
    ))
}

/// npm audit v2: one entry per affected package.
fn extract_v2_entry(entry: &Value) -> Option<VulnerabilityRecord> {
    let package = str_field(entry, "name")?;
    let severity = Severity::normalize(str_field(entry, "severity"));

    // `via` mixes advisory objects and bare package-name strings; the first
    // object carries the advisory detail.
    let advisory = entry
        .get("via")
        .and_then(Value::as_array)
        .and_then(|via| via.iter().find(|v| v.is_object()));

    let title = advisory
        .and_then(|a| str_field(a, "title"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Vulnerable dependency: {package}"));
    let description = advisory
        .and_then(|a| str_field(a, "url"))
        .map(|url| format!("Advisory: {url}"))
        .unwrap_or_default();

    let mut record =
        VulnerabilityRecord::new(SOURCE, severity, title, description, package);
    record.cwe = advisory
        .and_then(|a| a.get("cwe"))
        .and_then(first_cwe);
    record.cvss = advisory
        .and_then(|a| a.get("cvss"))
        .and_then(|c| c.get("score"))
        .and_then(Value::as_f64);
    Some(record)
}

/// npm audit v1: one entry per advisory.
fn extract_v1_advisory(advisory: &Value) -> Option<VulnerabilityRecord> {
    let package = str_field(advisory, "module_name")?;
    let severity = Severity::normalize(str_field(advisory, "severity"));
    let title = str_field(advisory, "title").unwrap_or("Vulnerable dependency");
    let description = str_field(advisory, "overview").unwrap_or_default();

    let mut record =
        VulnerabilityRecord::new(SOURCE, severity, title, description, package);
    record.cwe = advisory.get("cwe").and_then(first_cwe);
    Some(record)
}

/// CWE fields appear as either a string or an array of strings.
fn first_cwe(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
