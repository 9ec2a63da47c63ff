//! Static analysis extractor (semgrep-shaped JSON).

use serde_json::Value;

use vigil_core::{Severity, SourceError, SourceType, VulnerabilityRecord};

use super::{shape_error, str_field, u32_field};

const SOURCE: SourceType = SourceType::StaticAnalysis;

pub fn extract(raw: &Value) -> Result<Vec<VulnerabilityRecord>, SourceError> {
    let results = raw
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(SOURCE, "'results' is not an array"))?;

    Ok(results.iter().filter_map(extract_result).collect())
}

fn extract_result(result: &Value) -> Option<VulnerabilityRecord> {
    // The rule id doubles as the finding title; it is the stable name.
    let check_id = str_field(result, "check_id")?;
    let path = str_field(result, "path").unwrap_or("<unknown>");
    let extra = result.get("extra");

    let severity = Severity::normalize(extra.and_then(|e| str_field(e, "severity")));
    let message = extra
        .and_then(|e| str_field(e, "message"))
        .unwrap_or_default();

    let mut record = VulnerabilityRecord::new(SOURCE, severity, check_id, message, path);
    if let Some(start) = result.get("start") {
        record.line = u32_field(start, "line");
        record.column = u32_field(start, "col");
    }
    record.cwe = extra
        .and_then(|e| e.get("metadata"))
        .and_then(|m| m.get("cwe"))
        .and_then(first_cwe);
    Some(record)
}

fn first_cwe(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
        _ => None,
    }
}
