use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_CONFIDENCE, DEFAULT_SNAPSHOT_DIR};
use crate::error::{EclipseError, Result};
use crate::rules::{standard_rules, RuleTable, TransitionRule};
use crate::snapshot::SnapshotFormat;

/// Run configuration, loadable from TOML. Every section is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EclipseConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub snapshots: SnapshotConfig,
    #[serde(default = "standard_rules")]
    pub rules: Vec<TransitionRule>,
}

impl Default for EclipseConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            snapshots: SnapshotConfig::default(),
            rules: standard_rules(),
        }
    }
}

impl EclipseConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| EclipseError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EclipseError::Config(e.to_string()))
    }

    /// Validate the configured rules into a lookup table.
    pub fn rule_table(&self) -> Result<RuleTable> {
        RuleTable::new(self.rules.clone())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Candidates below this confidence count as "no detection".
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

fn default_min_confidence() -> f32 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_dir")]
    pub directory: PathBuf,
    #[serde(default)]
    pub format: SnapshotFormat,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_DIR)
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            directory: default_snapshot_dir(),
            format: SnapshotFormat::default(),
        }
    }
}
