//! The declarative gate rule table.
//!
//! A `GateConfig` is a mapping from gate id to rule, plus an `environments`
//! map whose overrides are merged per field: an override replaces only the
//! fields it names, never the whole rule. The merge is an explicit, total
//! function ([`GateRuleOverride::apply`]) so that overriding one field of
//! one gate can be tested to leave every sibling field untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::environment::Environment;
use crate::constants::{DEFAULT_COVERAGE_THRESHOLD, DEFAULT_MEDIUM_CAP, DEFAULT_REQUIRED_TESTS};
use crate::errors::ConfigError;
use crate::types::SourceType;

/// The six gate identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GateId {
    CriticalVulnerabilities,
    HighVulnerabilities,
    MediumVulnerabilities,
    SecurityRegressions,
    TestCoverage,
    ScanCoverage,
}

impl GateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalVulnerabilities => "critical-vulnerabilities",
            Self::HighVulnerabilities => "high-vulnerabilities",
            Self::MediumVulnerabilities => "medium-vulnerabilities",
            Self::SecurityRegressions => "security-regressions",
            Self::TestCoverage => "test-coverage",
            Self::ScanCoverage => "scan-coverage",
        }
    }

    pub fn all() -> &'static [GateId] {
        &[
            Self::CriticalVulnerabilities,
            Self::HighVulnerabilities,
            Self::MediumVulnerabilities,
            Self::SecurityRegressions,
            Self::TestCoverage,
            Self::ScanCoverage,
        ]
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A threshold with a comparison direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// `actual` must be ≤ the value.
    Max(f64),
    /// `actual` must be ≥ the value.
    Min(f64),
}

impl Threshold {
    pub fn satisfied_by(&self, actual: f64) -> bool {
        match self {
            Self::Max(limit) => actual <= *limit,
            Self::Min(floor) => actual >= *floor,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Max(v) | Self::Min(v) => *v,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max(v) => write!(f, "<= {v}"),
            Self::Min(v) => write!(f, ">= {v}"),
        }
    }
}

/// One gate's rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateRule {
    pub name: String,
    pub enabled: bool,
    /// A failing blocking gate is a violation; non-blocking gates only warn.
    pub blocking: bool,
    pub threshold: Threshold,
    /// Scan sources this gate aggregates over.
    #[serde(default)]
    pub sources: Vec<SourceType>,
    /// Test suites that must be present (test-coverage gate only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_tests: Vec<String>,
}

/// A partial rule: only named fields are replaced on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateRuleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tests: Option<Vec<String>>,
}

impl GateRuleOverride {
    /// Total per-field merge: every field is considered exactly once, and
    /// absent fields keep the base value.
    pub fn apply(&self, base: &GateRule) -> GateRule {
        GateRule {
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            enabled: self.enabled.unwrap_or(base.enabled),
            blocking: self.blocking.unwrap_or(base.blocking),
            threshold: self.threshold.unwrap_or(base.threshold),
            sources: self.sources.clone().unwrap_or_else(|| base.sources.clone()),
            required_tests: self
                .required_tests
                .clone()
                .unwrap_or_else(|| base.required_tests.clone()),
        }
    }
}

/// The full gate configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    pub gates: BTreeMap<GateId, GateRule>,
    #[serde(default)]
    pub environments: BTreeMap<Environment, BTreeMap<GateId, GateRuleOverride>>,
}

impl GateConfig {
    /// Resolve the effective rule table for an environment.
    pub fn resolve_for(&self, environment: Environment) -> BTreeMap<GateId, GateRule> {
        let overrides = self.environments.get(&environment);
        self.gates
            .iter()
            .map(|(id, rule)| {
                let effective = overrides
                    .and_then(|o| o.get(id))
                    .map(|o| o.apply(rule))
                    .unwrap_or_else(|| rule.clone());
                (*id, effective)
            })
            .collect()
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str, origin: &str) -> Result<GateConfig, ConfigError> {
        let config: GateConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, strictly.
    pub fn load(path: &Path) -> Result<GateConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        Self::from_json_str(&text, &path.display().to_string())
    }

    /// Load a config file, falling back to the built-in default on any
    /// failure. An absent path or missing file is a normal default; a
    /// malformed file is logged and returned so the run can surface the
    /// fallback as a warning.
    pub fn load_or_default(path: Option<&Path>) -> (GateConfig, Option<ConfigError>) {
        let Some(path) = path else {
            return (GateConfig::default(), None);
        };
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(error @ ConfigError::FileNotFound { .. }) => {
                tracing::debug!(%error, "no gate config file, using built-in default");
                (GateConfig::default(), None)
            }
            Err(error) => {
                tracing::warn!(%error, "malformed gate config, falling back to built-in default");
                (GateConfig::default(), Some(error))
            }
        }
    }

    /// Structural validation beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, rule) in &self.gates {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("gates.{id}.name"),
                    message: "gate name must be non-empty".to_string(),
                });
            }
            let value = rule.threshold.value();
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("gates.{id}.threshold"),
                    message: format!("threshold must be a finite non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for GateConfig {
    /// The built-in default: production-grade thresholds, relaxed per
    /// environment via overrides.
    fn default() -> Self {
        let all = SourceType::all().to_vec();
        let mut gates = BTreeMap::new();

        gates.insert(
            GateId::CriticalVulnerabilities,
            GateRule {
                name: "Critical vulnerabilities".to_string(),
                enabled: true,
                blocking: true,
                threshold: Threshold::Max(0.0),
                sources: all.clone(),
                required_tests: Vec::new(),
            },
        );
        gates.insert(
            GateId::HighVulnerabilities,
            GateRule {
                name: "High vulnerabilities".to_string(),
                enabled: true,
                blocking: true,
                threshold: Threshold::Max(0.0),
                sources: all.clone(),
                required_tests: Vec::new(),
            },
        );
        gates.insert(
            GateId::MediumVulnerabilities,
            GateRule {
                name: "Medium vulnerabilities".to_string(),
                enabled: true,
                blocking: false,
                threshold: Threshold::Max(DEFAULT_MEDIUM_CAP),
                sources: all.clone(),
                required_tests: Vec::new(),
            },
        );
        gates.insert(
            GateId::SecurityRegressions,
            GateRule {
                name: "Security regressions".to_string(),
                enabled: true,
                blocking: true,
                threshold: Threshold::Max(0.0),
                sources: all.clone(),
                required_tests: Vec::new(),
            },
        );
        gates.insert(
            GateId::TestCoverage,
            GateRule {
                name: "Test coverage".to_string(),
                enabled: true,
                blocking: false,
                threshold: Threshold::Min(DEFAULT_COVERAGE_THRESHOLD),
                sources: Vec::new(),
                required_tests: DEFAULT_REQUIRED_TESTS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        );
        gates.insert(
            GateId::ScanCoverage,
            GateRule {
                name: "Scan coverage".to_string(),
                enabled: true,
                blocking: false,
                threshold: Threshold::Min(all.len() as f64),
                sources: all,
                required_tests: Vec::new(),
            },
        );

        let mut development = BTreeMap::new();
        development.insert(
            GateId::HighVulnerabilities,
            GateRuleOverride {
                threshold: Some(Threshold::Max(10.0)),
                blocking: Some(false),
                ..Default::default()
            },
        );
        development.insert(
            GateId::TestCoverage,
            GateRuleOverride {
                enabled: Some(false),
                ..Default::default()
            },
        );

        let mut staging = BTreeMap::new();
        staging.insert(
            GateId::HighVulnerabilities,
            GateRuleOverride {
                threshold: Some(Threshold::Max(2.0)),
                ..Default::default()
            },
        );

        let mut environments = BTreeMap::new();
        environments.insert(Environment::Development, development);
        environments.insert(Environment::Staging, staging);

        Self {
            gates,
            environments,
        }
    }
}
