use crate::error::MeasureResult;
use crate::geometry::segment::LineSegment;

/// Angle between two measurement lines in degrees, folded into `[0, 90]`.
///
/// A line's direction is only known up to sign (endpoint order is whatever
/// the caller supplied), so the smaller of the two supplementary angles is
/// reported.
pub fn compute_angle(a: &LineSegment, b: &LineSegment) -> MeasureResult<f64> {
    let v1 = a.direction()?;
    let v2 = b.direction()?;

    let cos_theta = (v1.dot(&v2) / (v1.length() * v2.length())).clamp(-1.0, 1.0);
    let theta = cos_theta.acos().to_degrees();

    Ok(theta.min(180.0 - theta))
}
