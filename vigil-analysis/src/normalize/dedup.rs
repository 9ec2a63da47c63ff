//! Deduplication by stable content id.
//!
//! First-source-wins: when several records share an id, the first one in
//! input order keeps its metadata and the rest are dropped. Input order is
//! the caller's source order, which makes precedence an explicit decision
//! rather than an iteration-order accident.

use rustc_hash::FxHashSet;

use vigil_core::VulnerabilityRecord;

/// Collapse records sharing the same id, keeping the first occurrence.
pub fn deduplicate(records: Vec<VulnerabilityRecord>) -> Vec<VulnerabilityRecord> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.id.clone()) {
            out.push(record);
        }
    }

    out
}
