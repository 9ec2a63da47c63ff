//! Normalizer integration tests across sources.

use serde_json::json;

use vigil_analysis::normalize::{normalize, SourceDocument};
use vigil_core::{
    AllowlistEntry, ExceptionAllowlist, Severity, SourceType, VulnerabilityRecord,
};

fn dependency_doc(severity: &str, package: &str, title: &str) -> SourceDocument {
    SourceDocument::new(
        SourceType::Dependency,
        json!({
            "vulnerabilities": {
                package: {
                    "name": package,
                    "severity": severity,
                    "via": [{ "title": title, "url": "https://example.com/advisory" }]
                }
            }
        }),
    )
}

#[test]
fn test_normalizes_across_all_four_sources() {
    let documents = vec![
        dependency_doc("critical", "lodash", "Prototype Pollution"),
        SourceDocument::new(
            SourceType::StaticAnalysis,
            json!({ "results": [{
                "check_id": "tainted-sql",
                "path": "api/db.ts",
                "extra": { "severity": "ERROR", "message": "SQL from user input" }
            }] }),
        ),
        SourceDocument::new(
            SourceType::DynamicScan,
            json!({ "site": [{
                "@name": "https://app.example.com",
                "alerts": [{ "alert": "Missing CSP", "risk": "Medium" }]
            }] }),
        ),
        SourceDocument::new(
            SourceType::Container,
            json!({ "Results": [{
                "Target": "app",
                "Vulnerabilities": [{ "VulnerabilityID": "CVE-2025-1", "Severity": "LOW" }]
            }] }),
        ),
    ];

    let result = normalize(&documents, None);
    assert!(result.is_clean());
    assert_eq!(result.data.len(), 4);

    let severities: Vec<Severity> = result.data.iter().map(|r| r.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low
        ]
    );
}

/// Two raw documents describing the same (sourceType, source, title) always
/// normalize to the same id, regardless of field ordering or incidental
/// whitespace.
#[test]
fn test_same_finding_same_id_across_documents() {
    // Field order differs and the title carries stray whitespace.
    let first = SourceDocument::new(
        SourceType::Dependency,
        json!({
            "vulnerabilities": {
                "lodash": {
                    "severity": "high",
                    "name": "lodash",
                    "via": [{ "title": "Prototype Pollution" }]
                }
            }
        }),
    );
    let second = SourceDocument::new(
        SourceType::Dependency,
        json!({
            "vulnerabilities": {
                "lodash": {
                    "name": "lodash",
                    "via": [{ "title": "  prototype   pollution " }],
                    "severity": "high"
                }
            }
        }),
    );

    let a = normalize(std::slice::from_ref(&first), None);
    let b = normalize(std::slice::from_ref(&second), None);
    assert_eq!(a.data[0].id, b.data[0].id);
}

#[test]
fn test_duplicate_across_documents_keeps_first_source() {
    let first = dependency_doc("high", "lodash", "Prototype Pollution");
    let second = dependency_doc("low", "lodash", "Prototype Pollution");

    let result = normalize(&[first, second], None);
    assert_eq!(result.data.len(), 1);
    // First-source-wins: the first document's metadata survives.
    assert_eq!(result.data[0].severity, Severity::High);
}

#[test]
fn test_unparseable_document_accumulates_error_not_panic() {
    let good = dependency_doc("high", "lodash", "Prototype Pollution");
    let bad = SourceDocument::new(SourceType::Container, json!({ "wrong": "shape" }));

    let result = normalize(&[good, bad], None);
    assert_eq!(result.data.len(), 1, "good source still contributes");
    assert_eq!(result.error_count(), 1);
}

#[test]
fn test_allowlist_marks_approved() {
    let doc = dependency_doc("critical", "lodash", "Prototype Pollution");
    let expected = normalize(std::slice::from_ref(&doc), None);
    let id = expected.data[0].id.clone();

    let allowlist = ExceptionAllowlist {
        entries: vec![AllowlistEntry {
            id: id.clone(),
            reason: "mitigated at the gateway".into(),
            approved_by: Some("secops".into()),
            approved_at: None,
        }],
    };

    let result = normalize(&[doc], Some(&allowlist));
    assert!(result.data[0].approved);

    // Approval never rewrites identity or severity.
    assert_eq!(result.data[0].id, id);
    assert_eq!(result.data[0].severity, Severity::Critical);
}

#[test]
fn test_document_from_json_str_rejects_garbage() {
    let err = SourceDocument::from_json_str(SourceType::Dependency, "{ nope").unwrap_err();
    assert!(err.to_string().contains("dependency"));
}

#[test]
fn test_records_serialize_for_the_baseline_document() {
    let doc = dependency_doc("moderate", "qs", "ReDoS");
    let result = normalize(&[doc], None);
    let json = serde_json::to_string(&result.data).unwrap();
    let back: Vec<VulnerabilityRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result.data);
}
