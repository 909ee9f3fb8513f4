use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;
use crate::error::{MeasureError, MeasureResult};

/// A named measurement line with two ordered endpoints.
///
/// Endpoint order is whatever the caller supplied; nothing here
/// canonicalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub name: String,
    pub start: Point3d,
    pub end: Point3d,
}

impl LineSegment {
    pub fn new(name: impl Into<String>, start: Point3d, end: Point3d) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Raw direction `end - start`, not normalized.
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    pub fn midpoint(&self) -> Point3d {
        self.start.midpoint(&self.end)
    }

    /// Direction of the segment, rejecting segments shorter than the
    /// coincidence tolerance.
    pub fn direction(&self) -> MeasureResult<Vec3> {
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(MeasureError::non_finite(&self.name));
        }
        let v = self.vector();
        let length = v.length();
        if crate::default_tolerance().is_zero_length(length) {
            return Err(MeasureError::degenerate_line(&self.name, length));
        }
        Ok(v)
    }

    /// Point at parameter `t` along the carrier line (`t = 0` at start,
    /// `t = 1` at end). Not clamped.
    pub fn evaluate(&self, t: f64) -> Point3d {
        self.start + self.vector() * t
    }

    /// The endpoint farther from `p`. Ties resolve to `end`.
    pub fn far_endpoint_from(&self, p: &Point3d) -> Point3d {
        if p.distance_to(&self.start) > p.distance_to(&self.end) {
            self.start
        } else {
            self.end
        }
    }
}

/// A fitted sphere; only its center takes part in measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub name: String,
    pub center: Point3d,
}

impl Sphere {
    pub fn new(name: impl Into<String>, center: Point3d) -> Self {
        Self {
            name: name.into(),
            center,
        }
    }
}
