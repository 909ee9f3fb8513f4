use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{ToleranceStatus, ToleranceThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureKind {
    /// Sphere center to sphere center.
    Length,
    /// Acute angle between two lines, in degrees.
    Angle,
    /// Sphere center to its foot on a line.
    Perpendicular,
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "length"),
            Self::Angle => write!(f, "angle"),
            Self::Perpendicular => write!(f, "perpendicular"),
        }
    }
}

/// One measured quantity, optionally evaluated against a nominal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub kind: MeasureKind,
    pub label: String,
    pub actual: f64,
    pub nominal: Option<f64>,
    /// `actual - nominal`.
    pub deviation: Option<f64>,
    pub status: Option<ToleranceStatus>,
}

impl Measurement {
    /// Marker color for measurements without a status.
    pub const PLAIN_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

    pub fn new(kind: MeasureKind, label: impl Into<String>, actual: f64) -> Self {
        Self {
            kind,
            label: label.into(),
            actual,
            nominal: None,
            deviation: None,
            status: None,
        }
    }

    /// Compare against `nominal` and classify the absolute deviation.
    pub fn evaluate(self, nominal: f64, thresholds: &ToleranceThresholds) -> Self {
        let deviation = self.actual - nominal;
        Self {
            nominal: Some(nominal),
            deviation: Some(deviation),
            status: Some(thresholds.classify(deviation.abs())),
            ..self
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.status.is_some()
    }

    pub fn color(&self) -> [f32; 3] {
        self.status.map_or(Self::PLAIN_COLOR, ToleranceStatus::color)
    }
}
