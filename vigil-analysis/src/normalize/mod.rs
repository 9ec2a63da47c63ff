//! Vulnerability normalization.
//!
//! Ingests heterogeneous scan result documents and produces one canonical,
//! deduplicated `VulnerabilityRecord` list. Each source type has its own
//! extractor speaking that scanner's field vocabulary; severity mapping
//! goes through the single table in `vigil_core::types::severity`, so
//! unknown vocabularies fail safe to `medium` instead of silently dropping
//! to `low`.
//!
//! A missing or unparseable document contributes zero findings and a
//! `SourceError` in the result accumulator — never a silent pass.

pub mod dedup;
pub mod sources;

use std::path::Path;

use vigil_core::{
    ExceptionAllowlist, PipelineResult, SourceError, SourceType, VulnerabilityRecord,
};

pub use dedup::deduplicate;

/// One raw scan document, paired with its source type.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source_type: SourceType,
    pub raw: serde_json::Value,
}

impl SourceDocument {
    pub fn new(source_type: SourceType, raw: serde_json::Value) -> Self {
        Self { source_type, raw }
    }

    /// Parse a document from JSON text.
    pub fn from_json_str(source_type: SourceType, text: &str) -> Result<Self, SourceError> {
        let raw = serde_json::from_str(text).map_err(|e| SourceError::Unparseable {
            source_type,
            message: e.to_string(),
        })?;
        Ok(Self { source_type, raw })
    }

    /// Load a document from disk.
    pub fn from_path(source_type: SourceType, path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    source_type,
                    path: path.to_path_buf(),
                }
            } else {
                SourceError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_json_str(source_type, &text)
    }
}

/// Normalize raw scan documents into deduplicated records.
///
/// Extraction failures are accumulated, not fatal: the affected source
/// contributes nothing and the caller surfaces the error as a coverage
/// warning. Records whose id is on the allowlist come back with
/// `approved = true`.
pub fn normalize(
    documents: &[SourceDocument],
    allowlist: Option<&ExceptionAllowlist>,
) -> PipelineResult<Vec<VulnerabilityRecord>> {
    let mut result = PipelineResult::new(Vec::new());

    for document in documents {
        match extract(document) {
            Ok(records) => {
                tracing::debug!(
                    source = %document.source_type,
                    count = records.len(),
                    "extracted findings"
                );
                result.data.extend(records);
            }
            Err(error) => {
                tracing::warn!(source = %document.source_type, %error, "source skipped");
                result.add_error(error);
            }
        }
    }

    let mut records = deduplicate(std::mem::take(&mut result.data));
    if let Some(allowlist) = allowlist {
        let approved = allowlist.id_set();
        for record in &mut records {
            record.approved = approved.contains(record.id.as_str());
        }
    }
    result.data = records;
    result
}

/// Dispatch a document to its source-specific extractor.
fn extract(document: &SourceDocument) -> Result<Vec<VulnerabilityRecord>, SourceError> {
    match document.source_type {
        SourceType::Dependency => sources::dependency::extract(&document.raw),
        SourceType::StaticAnalysis => sources::static_analysis::extract(&document.raw),
        SourceType::DynamicScan => sources::dynamic_scan::extract(&document.raw),
        SourceType::Container => sources::container::extract(&document.raw),
    }
}
