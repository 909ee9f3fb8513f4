//! Capability interface between the measurement kernel and its host.
//!
//! The kernel needs exactly two services it does not define itself:
//! intersecting two measurement lines, and a 3-point rigid alignment used to
//! place arcs. `DefaultGeometryProvider` implements both in-crate; a host
//! adapter can substitute its own numerics.

use crate::error::MeasureResult;
use crate::geometry::intersection::segment_intersections;
use crate::geometry::point::Point3d;
use crate::geometry::segment::LineSegment;
use crate::geometry::transform::{rigid_align, Transform};
use crate::Tolerance;

/// Geometry services required by anchor resolution and arc placement.
pub trait GeometryProvider {
    /// Points where the two lines meet. May be empty; order is
    /// provider-defined and callers use the first entry.
    fn planar_intersections(&self, a: &LineSegment, b: &LineSegment) -> Vec<Point3d>;

    /// Transform taking the frame of `src` onto the frame of `dst`.
    fn align(&self, src: [Point3d; 3], dst: [Point3d; 3]) -> MeasureResult<Transform>;

    fn apply(&self, transform: &Transform, p: &Point3d) -> Point3d {
        transform.transform_point(p)
    }
}

/// In-crate provider: closest-approach segment intersection and an
/// orthonormal-frame rigid alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGeometryProvider {
    pub tolerance: Tolerance,
}

impl DefaultGeometryProvider {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }
}

impl GeometryProvider for DefaultGeometryProvider {
    fn planar_intersections(&self, a: &LineSegment, b: &LineSegment) -> Vec<Point3d> {
        segment_intersections(a, b, self.tolerance.intersection)
    }

    fn align(&self, src: [Point3d; 3], dst: [Point3d; 3]) -> MeasureResult<Transform> {
        rigid_align(src, dst)
    }
}
