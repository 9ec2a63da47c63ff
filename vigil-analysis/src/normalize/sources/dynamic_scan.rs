//! Dynamic scan extractor (ZAP-shaped JSON).

use serde_json::Value;

use vigil_core::{Severity, SourceError, SourceType, VulnerabilityRecord};

use super::{shape_error, str_field};

const SOURCE: SourceType = SourceType::DynamicScan;

pub fn extract(raw: &Value) -> Result<Vec<VulnerabilityRecord>, SourceError> {
    let sites = raw
        .get("site")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(SOURCE, "'site' is not an array"))?;

    let mut records = Vec::new();
    for site in sites {
        let site_name = str_field(site, "@name").unwrap_or("<unknown>");
        let Some(alerts) = site.get("alerts").and_then(Value::as_array) else {
            continue;
        };
        for alert in alerts {
            if let Some(record) = extract_alert(alert, site_name) {
                records.push(record);
            }
        }
    }
    Ok(records)
}

fn extract_alert(alert: &Value, site_name: &str) -> Option<VulnerabilityRecord> {
    let title = str_field(alert, "alert").or_else(|| str_field(alert, "name"))?;

    // Risk appears as "risk": "High" or "riskdesc": "High (Medium)";
    // only the leading word is the severity.
    let risk = str_field(alert, "risk").or_else(|| {
        str_field(alert, "riskdesc").map(|desc| desc.split_whitespace().next().unwrap_or(desc))
    });
    let severity = Severity::normalize(risk);

    // Identity follows the first affected URI, falling back to the site.
    let uri = alert
        .get("instances")
        .and_then(Value::as_array)
        .and_then(|instances| instances.first())
        .and_then(|instance| str_field(instance, "uri"))
        .unwrap_or(site_name);

    let description = str_field(alert, "desc").unwrap_or_default();

    let mut record = VulnerabilityRecord::new(SOURCE, severity, title, description, uri);
    record.cwe = str_field(alert, "cweid")
        .filter(|id| !id.is_empty() && *id != "-1")
        .map(|id| format!("CWE-{id}"));
    Some(record)
}
