//! Measurement configuration: thresholds, nominal tables, curated pair
//! tables and arc sampling, stored as versioned JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::ToleranceThresholds;
use crate::error::MeasureError;
use crate::measure::arc::ArcOptions;
use crate::measurement::MeasureKind;
use crate::pairs::PairStrategy;

/// Format identifier of configuration files.
pub const CONFIG_FORMAT: &str = "metrology-config";

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 1;

/// Errors while loading or saving a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("unknown configuration format: {0}")]
    UnknownFormat(String),

    #[error("configuration version {file_version} is newer than supported version {supported_version}")]
    FutureVersion { file_version: u32, supported_version: u32 },

    #[error("invalid {kind} thresholds: good {good}, warning {warning}")]
    InvalidThresholds { kind: MeasureKind, good: f64, warning: f64 },

    #[error("invalid arc options: {0}")]
    InvalidArcOptions(MeasureError),
}

/// Nominal values keyed by `"<first>_<second>"`. Lookups accept either
/// orientation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NominalTable(BTreeMap<String, f64>);

impl NominalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(first: &str, second: &str) -> String {
        format!("{first}_{second}")
    }

    pub fn insert(&mut self, first: &str, second: &str, value: f64) {
        self.0.insert(Self::key(first, second), value);
    }

    pub fn get(&self, first: &str, second: &str) -> Option<f64> {
        self.0
            .get(&Self::key(first, second))
            .or_else(|| self.0.get(&Self::key(second, first)))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings for one kind of measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindConfig {
    pub thresholds: ToleranceThresholds,
    /// Nominal used for pairs missing from `nominals`.
    pub default_nominal: f64,
    #[serde(default)]
    pub nominals: NominalTable,
    /// Curated pairs. For perpendiculars, `(sphere, line)` names.
    #[serde(default)]
    pub pairs: Vec<(String, String)>,
}

impl KindConfig {
    pub fn new(thresholds: ToleranceThresholds, default_nominal: f64) -> Self {
        Self {
            thresholds,
            default_nominal,
            nominals: NominalTable::new(),
            pairs: Vec::new(),
        }
    }

    pub fn nominal_for(&self, first: &str, second: &str) -> f64 {
        self.nominals.get(first, second).unwrap_or(self.default_nominal)
    }

    /// The curated pair table as an enumeration strategy.
    pub fn default_strategy(&self) -> PairStrategy {
        PairStrategy::Default(self.pairs.clone())
    }

    fn with_pairs(mut self, pairs: &[(&str, &str)]) -> Self {
        self.pairs = pairs.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect();
        self
    }

    fn with_nominals(mut self, nominals: &[(&str, &str, f64)]) -> Self {
        for &(a, b, value) in nominals {
            self.nominals.insert(a, b, value);
        }
        self
    }
}

/// Complete measurement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    pub length: KindConfig,
    pub angle: KindConfig,
    pub perpendicular: KindConfig,
    pub arc: ArcOptions,
}

/// Standard plate layout: ten spheres, nine inspected lengths.
const PLATE_LENGTHS: [(&str, &str, f64); 9] = [
    ("1", "2", 8.5),
    ("2", "3", 7.6),
    ("4", "5", 8.5),
    ("1", "4", 7.6),
    ("8", "10", 9.93),
    ("2", "5", 7.6),
    ("7", "9", 9.3),
    ("3", "6", 7.6),
    ("5", "6", 7.6),
];

const PLATE_ANGLES: [(&str, &str, f64); 9] = [
    ("L1_2", "L1_4", 90.0),
    ("L1_2", "L8_10", 45.0),
    ("L8_10", "L4_5", 45.0),
    ("L2_5", "L4_5", 90.0),
    ("L2_5", "L8_10", 45.0),
    ("L2_5", "L7_9", 45.0),
    ("L2_5", "L5_6", 90.0),
    ("L7_9", "L5_6", 45.0),
    ("L3_6", "L7_9", 45.0),
];

impl Default for MeasurementConfig {
    fn default() -> Self {
        let length_pairs: Vec<(&str, &str)> = PLATE_LENGTHS.iter().map(|&(a, b, _)| (a, b)).collect();
        let angle_pairs: Vec<(&str, &str)> = PLATE_ANGLES.iter().map(|&(a, b, _)| (a, b)).collect();

        Self {
            length: KindConfig::new(ToleranceThresholds::new(0.01, 0.1), 10.0)
                .with_pairs(&length_pairs)
                .with_nominals(&PLATE_LENGTHS),
            angle: KindConfig::new(ToleranceThresholds::new(1.0, 5.0), 90.0)
                .with_pairs(&angle_pairs)
                .with_nominals(&PLATE_ANGLES)
                .with_nominals(&[("L2_3", "L7_9", 45.0), ("L2_3", "L3_6", 90.0)]),
            perpendicular: KindConfig::new(ToleranceThresholds::new(0.1, 0.5), 10.0),
            arc: ArcOptions::default(),
        }
    }
}

impl MeasurementConfig {
    pub fn kind(&self, kind: MeasureKind) -> &KindConfig {
        match kind {
            MeasureKind::Length => &self.length,
            MeasureKind::Angle => &self.angle,
            MeasureKind::Perpendicular => &self.perpendicular,
        }
    }

    /// Reject thresholds that are negative, non-finite or misordered, and
    /// arc options that [`ArcOptions::validate`] refuses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in [MeasureKind::Length, MeasureKind::Angle, MeasureKind::Perpendicular] {
            let t = self.kind(kind).thresholds;
            let usable = t.good.is_finite() && t.warning.is_finite() && t.good >= 0.0;
            if !usable || !t.is_ordered() {
                return Err(ConfigError::InvalidThresholds {
                    kind,
                    good: t.good,
                    warning: t.warning,
                });
            }
        }
        self.arc.validate().map_err(ConfigError::InvalidArcOptions)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFileRaw {
    format: String,
    version: u32,
    #[serde(flatten)]
    config: MeasurementConfig,
}

#[derive(Serialize)]
struct ConfigFile<'a> {
    format: &'static str,
    version: u32,
    #[serde(flatten)]
    config: &'a MeasurementConfig,
}

/// Parse and validate a configuration from JSON.
///
/// Sections missing from the file fall back to their defaults.
pub fn load_config(json: &str) -> Result<MeasurementConfig, ConfigError> {
    let raw: ConfigFileRaw = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if raw.format != CONFIG_FORMAT {
        return Err(ConfigError::UnknownFormat(raw.format));
    }
    if raw.version > CONFIG_VERSION {
        return Err(ConfigError::FutureVersion {
            file_version: raw.version,
            supported_version: CONFIG_VERSION,
        });
    }

    raw.config.validate()?;
    debug!(
        version = raw.version,
        length_pairs = raw.config.length.pairs.len(),
        angle_pairs = raw.config.angle.pairs.len(),
        "configuration loaded"
    );
    Ok(raw.config)
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<MeasurementConfig, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    load_config(&json)
}

/// Serialize a configuration to pretty-printed JSON.
pub fn save_config(config: &MeasurementConfig) -> Result<String, ConfigError> {
    let file = ConfigFile {
        format: CONFIG_FORMAT,
        version: CONFIG_VERSION,
        config,
    };
    serde_json::to_string_pretty(&file).map_err(|e| ConfigError::Parse(e.to_string()))
}
