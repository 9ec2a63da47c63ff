//! Canonical severity levels and the shared vocabulary table.
//!
//! Every scan source names severities differently (npm audit says
//! "moderate", semgrep says "ERROR", ZAP says "Informational", trivy
//! shouts "CRITICAL"). This module owns the single lookup table that maps
//! all of them onto four canonical levels. Both the normalizer and the
//! gate evaluator consume this table, so the two can never disagree on
//! vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical severity, ordered most severe first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Alias table mapping each scanner's native vocabulary to a canonical level.
///
/// Keys are matched case-insensitively after trimming. Anything absent from
/// this table normalizes to [`Severity::DEFAULT`].
const VOCABULARY: &[(&str, Severity)] = &[
    // dependency audit (npm/yarn)
    ("critical", Severity::Critical),
    ("high", Severity::High),
    ("moderate", Severity::Medium),
    ("low", Severity::Low),
    ("info", Severity::Low),
    // static analysis (semgrep)
    ("error", Severity::High),
    ("warning", Severity::Medium),
    // dynamic scan (ZAP)
    ("informational", Severity::Low),
    // container scan (trivy)
    ("medium", Severity::Medium),
    ("negligible", Severity::Low),
    ("none", Severity::Low),
];

impl Severity {
    /// Fail-safe default for unrecognized or missing severities.
    ///
    /// Deliberately `Medium`, not `Low`: an unknown vocabulary entry must
    /// never quietly drop below the advisory thresholds.
    pub const DEFAULT: Severity = Severity::Medium;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::High, Self::Medium, Self::Low]
    }

    /// Look up a native vocabulary entry. Case-insensitive, trimmed.
    pub fn from_vocabulary(raw: &str) -> Option<Severity> {
        let needle = raw.trim().to_ascii_lowercase();
        VOCABULARY
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, severity)| *severity)
    }

    /// Normalize a possibly-missing native severity, falling back to
    /// [`Severity::DEFAULT`] and logging the unrecognized value.
    pub fn normalize(raw: Option<&str>) -> Severity {
        match raw {
            Some(value) => Self::from_vocabulary(value).unwrap_or_else(|| {
                tracing::warn!(value, "unrecognized severity, defaulting to medium");
                Self::DEFAULT
            }),
            None => Self::DEFAULT,
        }
    }

    /// True if this severity is at or above the given floor
    /// (Critical meets every floor; Low meets only the Low floor).
    pub fn meets_floor(&self, floor: Severity) -> bool {
        *self <= floor
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_most_severe_first() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
    }

    #[test]
    fn vocabulary_aliases() {
        assert_eq!(Severity::from_vocabulary("moderate"), Some(Severity::Medium));
        assert_eq!(Severity::from_vocabulary("ERROR"), Some(Severity::High));
        assert_eq!(
            Severity::from_vocabulary(" Informational "),
            Some(Severity::Low)
        );
        assert_eq!(Severity::from_vocabulary("CRITICAL"), Some(Severity::Critical));
    }

    #[test]
    fn unknown_defaults_to_medium() {
        assert_eq!(Severity::from_vocabulary("catastrophic"), None);
        assert_eq!(Severity::normalize(Some("catastrophic")), Severity::Medium);
        assert_eq!(Severity::normalize(None), Severity::Medium);
    }

    #[test]
    fn floor_semantics() {
        assert!(Severity::Critical.meets_floor(Severity::High));
        assert!(Severity::High.meets_floor(Severity::High));
        assert!(!Severity::Medium.meets_floor(Severity::High));
        assert!(Severity::Low.meets_floor(Severity::Low));
    }
}
