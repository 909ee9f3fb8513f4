use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::geometry::point::Point3d;
use crate::geometry::segment::LineSegment;
use crate::traits::{DefaultGeometryProvider, GeometryProvider};

/// How the arc center was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorSource {
    /// The provider reported an intersection; its first point is the center.
    Intersection,
    /// No intersection; the center is the midpoint of the closest endpoint pair.
    ClosestEndpoints,
}

/// Center plus one direction reference point per line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcAnchors {
    pub center: Point3d,
    pub toward_a: Point3d,
    pub toward_b: Point3d,
    pub source: AnchorSource,
}

/// Resolve arc anchors with the in-crate geometry provider.
pub fn resolve_arc_anchors(a: &LineSegment, b: &LineSegment) -> ArcAnchors {
    resolve_arc_anchors_with(&DefaultGeometryProvider::default(), a, b)
}

/// Find where two lines meet, or a usable stand-in when they do not.
///
/// With an intersection, each line's direction point is its endpoint
/// farther from the center. Without one (parallel, skew, or meeting outside
/// the segments), the closest of the four endpoint pairs supplies the center
/// as its midpoint, and the opposite endpoints supply the directions.
#[instrument(skip(provider, a, b), fields(a = %a.name, b = %b.name))]
pub fn resolve_arc_anchors_with<P: GeometryProvider + ?Sized>(
    provider: &P,
    a: &LineSegment,
    b: &LineSegment,
) -> ArcAnchors {
    let hits = provider.planar_intersections(a, b);
    if let Some(&center) = hits.first() {
        debug!(hits = hits.len(), center = ?[center.x, center.y, center.z], "using line intersection");
        return ArcAnchors {
            center,
            toward_a: a.far_endpoint_from(&center),
            toward_b: b.far_endpoint_from(&center),
            source: AnchorSource::Intersection,
        };
    }

    // (close on a, close on b, far on a, far on b) in start-start,
    // start-end, end-start, end-end order; strict `<` keeps the earliest tie.
    let candidates = [
        (a.start, b.start, a.end, b.end),
        (a.start, b.end, a.end, b.start),
        (a.end, b.start, a.start, b.end),
        (a.end, b.end, a.start, b.start),
    ];
    let mut best = candidates[0];
    let mut best_distance = best.0.distance_to(&best.1);
    for candidate in &candidates[1..] {
        let distance = candidate.0.distance_to(&candidate.1);
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }

    let (close_a, close_b, far_a, far_b) = best;
    let center = close_a.midpoint(&close_b);
    debug!(gap = best_distance, center = ?[center.x, center.y, center.z], "no intersection, using closest endpoints");

    ArcAnchors {
        center,
        toward_a: far_a,
        toward_b: far_b,
        source: AnchorSource::ClosestEndpoints,
    }
}
