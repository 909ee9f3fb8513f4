//! Three-tier tolerance classification of measured deviations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tolerance status of a measurement, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToleranceStatus {
    /// Deviation within the good threshold.
    Good,
    /// Deviation above good but within the warning threshold.
    Warning,
    /// Deviation beyond the warning threshold.
    Error,
}

impl ToleranceStatus {
    /// Marker color (RGB, 0..1) used for lines, arcs and perpendiculars.
    pub fn color(self) -> [f32; 3] {
        match self {
            Self::Good => [0.0, 1.0, 0.0],
            Self::Warning => [1.0, 1.0, 0.0],
            Self::Error => [1.0, 0.0, 0.0],
        }
    }
}

impl fmt::Display for ToleranceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Good/warning limits on the absolute deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceThresholds {
    pub good: f64,
    pub warning: f64,
}

impl Default for ToleranceThresholds {
    fn default() -> Self {
        Self {
            good: 0.1,
            warning: 0.5,
        }
    }
}

impl ToleranceThresholds {
    pub fn new(good: f64, warning: f64) -> Self {
        Self { good, warning }
    }

    pub fn classify(&self, deviation_abs: f64) -> ToleranceStatus {
        classify(deviation_abs, self.good, self.warning)
    }

    /// Whether `good <= warning`. With `good > warning` the Warning tier is
    /// unreachable.
    pub fn is_ordered(&self) -> bool {
        self.good <= self.warning
    }
}

/// Classify an absolute deviation against two thresholds.
///
/// Threshold ordering is not checked here.
pub fn classify(deviation_abs: f64, good: f64, warning: f64) -> ToleranceStatus {
    if deviation_abs <= good {
        ToleranceStatus::Good
    } else if deviation_abs <= warning {
        ToleranceStatus::Warning
    } else {
        ToleranceStatus::Error
    }
}
