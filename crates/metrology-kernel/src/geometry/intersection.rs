use super::point::Point3d;
use super::segment::LineSegment;

/// Closest approach between the carrier lines of two segments.
///
/// Parameters are relative to the raw segment vectors, so `t` in `[0, 1]`
/// lies on the segment itself.
#[derive(Debug, Clone, Copy)]
pub struct ClosestApproach {
    pub point_a: Point3d,
    pub t_a: f64,
    pub point_b: Point3d,
    pub t_b: f64,
    pub distance: f64,
}

/// Closest points between the infinite lines through two segments.
/// Returns None if the lines are parallel or either segment has no length.
pub fn closest_approach(a: &LineSegment, b: &LineSegment) -> Option<ClosestApproach> {
    let da = a.vector();
    let db = b.vector();
    let w = a.start - b.start;
    let aa = da.dot(&da);
    let ab = da.dot(&db);
    let bb = db.dot(&db);
    let d = da.dot(&w);
    let e = db.dot(&w);

    let denom = aa * bb - ab * ab;
    // Relative test: denom is |da|^2 |db|^2 sin^2(theta).
    if aa < 1e-30 || bb < 1e-30 || denom <= 1e-12 * aa * bb {
        return None;
    }

    let t_a = (ab * e - bb * d) / denom;
    let t_b = (aa * e - ab * d) / denom;
    let point_a = a.evaluate(t_a);
    let point_b = b.evaluate(t_b);

    Some(ClosestApproach {
        point_a,
        t_a,
        point_b,
        t_b,
        distance: point_a.distance_to(&point_b),
    })
}

/// Points where two segments meet, within `tol` in both gap and extent.
///
/// Skew, parallel and non-overlapping segments yield an empty list.
pub fn segment_intersections(a: &LineSegment, b: &LineSegment, tol: f64) -> Vec<Point3d> {
    let Some(hit) = closest_approach(a, b) else {
        return vec![];
    };
    if hit.distance >= tol {
        return vec![];
    }
    let within = |t: f64, seg: &LineSegment| {
        let slack = tol / seg.length();
        t >= -slack && t <= 1.0 + slack
    };
    if within(hit.t_a, a) && within(hit.t_b, b) {
        vec![hit.point_a.midpoint(&hit.point_b)]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, a: [f64; 3], b: [f64; 3]) -> LineSegment {
        LineSegment::new(name, Point3d::new(a[0], a[1], a[2]), Point3d::new(b[0], b[1], b[2]))
    }

    #[test]
    fn test_crossing_segments() {
        let a = seg("A", [-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = seg("B", [0.0, -1.0, 0.0], [0.0, 3.0, 0.0]);
        let hits = segment_intersections(&a, &b, 1e-6);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].distance_to(&Point3d::ORIGIN) < 1e-12);
    }

    #[test]
    fn test_shared_endpoint_counts_as_intersection() {
        let a = seg("L1_2", [0.0, 0.0, 0.0], [8.5, 0.0, 0.0]);
        let b = seg("L1_4", [0.0, 0.0, 0.0], [0.0, 7.6, 0.0]);
        let hits = segment_intersections(&a, &b, 1e-6);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].distance_to(&Point3d::ORIGIN) < 1e-12);
    }

    #[test]
    fn test_lines_meeting_beyond_segment_extent() {
        let a = seg("A", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = seg("B", [3.0, 1.0, 0.0], [3.0, 2.0, 0.0]);
        let approach = closest_approach(&a, &b).unwrap();
        assert!(approach.distance < 1e-12);
        assert!((approach.t_a - 3.0).abs() < 1e-12);
        assert!(segment_intersections(&a, &b, 1e-6).is_empty());
    }

    #[test]
    fn test_skew_segments() {
        let a = seg("A", [-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = seg("B", [0.0, -1.0, 2.0], [0.0, 1.0, 2.0]);
        let approach = closest_approach(&a, &b).unwrap();
        assert!((approach.distance - 2.0).abs() < 1e-12);
        assert!(segment_intersections(&a, &b, 1e-6).is_empty());
    }

    #[test]
    fn test_parallel_segments() {
        let a = seg("A", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = seg("B", [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]);
        assert!(closest_approach(&a, &b).is_none());
        assert!(segment_intersections(&a, &b, 1e-6).is_empty());
    }
}
