use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::point::Point3d;
use crate::geometry::segment::LineSegment;

/// Foot of the perpendicular from a point onto a line's infinite extension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perpendicular {
    pub foot: Point3d,
    /// Distance from the point to `foot`, always `>= 0`.
    pub distance: f64,
    /// Line parameter of `foot`: 0 at the start, 1 at the end, unclamped.
    pub parameter: f64,
}

/// Euclidean distance between two points (sphere centers).
pub fn compute_length(p1: &Point3d, p2: &Point3d) -> f64 {
    p1.distance_to(p2)
}

/// Project `point` onto the infinite line through `line`.
pub fn compute_perpendicular(point: &Point3d, line: &LineSegment) -> MeasureResult<Perpendicular> {
    let dir = line.direction()?;
    if !point.is_finite() {
        return Err(MeasureError::non_finite("point"));
    }
    let t = (*point - line.start).dot(&dir) / dir.length_squared();
    let foot = line.evaluate(t);

    Ok(Perpendicular {
        foot,
        distance: point.distance_to(&foot),
        parameter: t,
    })
}
