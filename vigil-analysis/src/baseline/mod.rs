//! Baseline persistence.
//!
//! A baseline is written once per "generate baseline" operation and read on
//! every regression run. Generation produces a fresh snapshot that
//! supersedes the previous one; nothing mutates a baseline in place.

pub mod diff;

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use vigil_core::{Baseline, BaselineError, BaselineMetadata, SourceType, VulnerabilityRecord};

pub use diff::diff;

/// Reads and writes baseline snapshots as JSON documents.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a new snapshot from the current findings.
    ///
    /// Records that were already in the previous baseline keep their
    /// original `first_seen`, preserving the detection lineage across
    /// snapshots.
    pub fn generate(
        records: Vec<VulnerabilityRecord>,
        sources: Vec<SourceType>,
        environment: Option<String>,
        previous: Option<&Baseline>,
    ) -> Baseline {
        let mut records = records;
        if let Some(previous) = previous {
            let first_seen: FxHashMap<&str, _> = previous
                .vulnerabilities
                .iter()
                .map(|v| (v.id.as_str(), v.first_seen))
                .collect();
            for record in &mut records {
                if let Some(seen) = first_seen.get(record.id.as_str()) {
                    record.first_seen = *seen;
                }
            }
        }

        let mut metadata = BaselineMetadata::new(sources);
        metadata.environment = environment;
        Baseline::new(metadata, records)
    }

    /// Persist a snapshot, replacing any previous one at this path.
    pub fn save(&self, baseline: &Baseline) -> Result<(), BaselineError> {
        let json = serde_json::to_string_pretty(baseline).map_err(|e| BaselineError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(|e| BaselineError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::info!(
            path = %self.path.display(),
            findings = baseline.len(),
            "baseline written"
        );
        Ok(())
    }

    /// Load the snapshot at this path.
    pub fn load(&self) -> Result<Baseline, BaselineError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BaselineError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                BaselineError::Io {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;
        serde_json::from_str(&text).map_err(|e| BaselineError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Load the snapshot if one exists; a missing file is a first run, not
    /// an error.
    pub fn load_optional(&self) -> Result<Option<Baseline>, BaselineError> {
        match self.load() {
            Ok(baseline) => Ok(Some(baseline)),
            Err(BaselineError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
