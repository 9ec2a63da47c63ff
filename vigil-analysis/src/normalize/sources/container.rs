//! Container scan extractor (trivy-shaped JSON).

use serde_json::Value;

use vigil_core::{Severity, SourceError, SourceType, VulnerabilityRecord};

use super::{shape_error, str_field};

const SOURCE: SourceType = SourceType::Container;

pub fn extract(raw: &Value) -> Result<Vec<VulnerabilityRecord>, SourceError> {
    let results = raw
        .get("Results")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(SOURCE, "'Results' is not an array"))?;

    let mut records = Vec::new();
    for result in results {
        let target = str_field(result, "Target").unwrap_or("<unknown>");
        // A clean target reports "Vulnerabilities": null.
        let Some(vulnerabilities) = result.get("Vulnerabilities").and_then(Value::as_array)
        else {
            continue;
        };
        for vulnerability in vulnerabilities {
            if let Some(record) = extract_vulnerability(vulnerability, target) {
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn extract_vulnerability(vulnerability: &Value, target: &str) -> Option<VulnerabilityRecord> {
    let id = str_field(vulnerability, "VulnerabilityID")?;
    let package = str_field(vulnerability, "PkgName").unwrap_or(target);
    let severity = Severity::normalize(str_field(vulnerability, "Severity"));

    let title = match str_field(vulnerability, "Title") {
        Some(title) => format!("{id}: {title}"),
        None => id.to_string(),
    };
    let description = str_field(vulnerability, "Description").unwrap_or_default();

    let mut record = VulnerabilityRecord::new(SOURCE, severity, title, description, package);
    record.cwe = vulnerability
        .get("CweIDs")
        .and_then(Value::as_array)
        .and_then(|ids| ids.iter().find_map(Value::as_str))
        .map(str::to_string);
    record.cvss = first_v3_score(vulnerability.get("CVSS"));
    Some(record)
}

/// CVSS is a map of vendor → { V3Score, ... }; any vendor's V3 score will do.
fn first_v3_score(cvss: Option<&Value>) -> Option<f64> {
    cvss?.as_object()?.values().find_map(|vendor| {
        vendor.get("V3Score").and_then(Value::as_f64)
    })
}
