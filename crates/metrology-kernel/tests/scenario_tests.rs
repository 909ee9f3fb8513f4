//! End-to-end measurement scenarios on a ten-sphere inspection plate.

use std::f64::consts::FRAC_1_SQRT_2;

use approx::assert_abs_diff_eq;

use metrology_kernel::{
    classify, compute_angle, compute_perpendicular, enumerate_cross_pairs, enumerate_pairs, inspect_angles,
    inspect_lengths, inspect_perpendiculars, load_config, resolve_arc_anchors, summarize, AnchorSource, ConfigError,
    CrossPair, CrossStrategy, InspectionPlan, LineSegment, MeasureError, MeasurementConfig, PairStrategy, Point3d, Sphere,
    ToleranceStatus,
};

const PLATE_CONFIG: &str = include_str!("fixtures/standard_plate.json");

fn pt(x: f64, y: f64, z: f64) -> Point3d {
    Point3d::new(x, y, z)
}

/// Plate with sphere 6 lifted 0.05 off its nominal position.
fn plate_spheres() -> Vec<Sphere> {
    let c = FRAC_1_SQRT_2;
    let centers = [
        ("1", pt(0.0, 0.0, 0.0)),
        ("2", pt(8.5, 0.0, 0.0)),
        ("3", pt(16.1, 0.0, 0.0)),
        ("4", pt(0.0, 7.6, 0.0)),
        ("5", pt(8.5, 7.6, 0.0)),
        ("6", pt(16.1, 7.65, 0.0)),
        ("7", pt(-10.0, 0.0, 0.0)),
        ("8", pt(20.0, 0.0, 0.0)),
        ("9", pt(-10.0 + 9.3 * c, -9.3 * c, 0.0)),
        ("10", pt(20.0 + 9.93 * c, 9.93 * c, 0.0)),
    ];
    centers.into_iter().map(|(name, center)| Sphere::new(name, center)).collect()
}

/// One line per curated length pair, named `L<a>_<b>`.
fn plate_lines(spheres: &[Sphere], config: &MeasurementConfig) -> Vec<LineSegment> {
    let center = |name: &str| spheres.iter().find(|s| s.name == name).map(|s| s.center).unwrap();
    config
        .length
        .pairs
        .iter()
        .map(|(a, b)| LineSegment::new(format!("L{a}_{b}"), center(a), center(b)))
        .collect()
}

// ---------------------------------------------------------------------------
// Single-operation scenarios
// ---------------------------------------------------------------------------

#[test]
fn right_angle_between_axes() {
    let a = LineSegment::new("X", pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0));
    let b = LineSegment::new("Y", pt(0.0, 0.0, 0.0), pt(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(compute_angle(&a, &b).unwrap(), 90.0, epsilon = 1e-12);
}

#[test]
fn parallel_lines_have_zero_angle() {
    let a = LineSegment::new("X", pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0));
    let b = LineSegment::new("X2", pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0));
    assert_abs_diff_eq!(compute_angle(&a, &b).unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn perpendicular_onto_x_axis() {
    let line = LineSegment::new("L", pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0));
    let perp = compute_perpendicular(&pt(0.0, 1.0, 0.0), &line).unwrap();
    assert_abs_diff_eq!(perp.foot.distance_to(&Point3d::ORIGIN), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(perp.distance, 1.0, epsilon = 1e-12);
}

#[test]
fn three_tier_classification() {
    assert_eq!(classify(0.05, 0.1, 0.5), ToleranceStatus::Good);
    assert_eq!(classify(0.3, 0.1, 0.5), ToleranceStatus::Warning);
    assert_eq!(classify(0.9, 0.1, 0.5), ToleranceStatus::Error);
}

#[test]
fn parallel_segments_use_closest_endpoints() {
    let a = LineSegment::new("A", pt(0.0, 0.0, 0.0), pt(1.0, 0.0, 0.0));
    let b = LineSegment::new("B", pt(0.0, 1.0, 0.0), pt(1.0, 1.0, 0.0));
    let anchors = resolve_arc_anchors(&a, &b);
    assert_eq!(anchors.source, AnchorSource::ClosestEndpoints);
    assert_abs_diff_eq!(anchors.center.distance_to(&pt(0.0, 0.5, 0.0)), 0.0, epsilon = 1e-12);
    assert_eq!(anchors.toward_a, pt(1.0, 0.0, 0.0));
    assert_eq!(anchors.toward_b, pt(1.0, 1.0, 0.0));
}

// ---------------------------------------------------------------------------
// Plate inspection
// ---------------------------------------------------------------------------

#[test]
fn fixture_matches_builtin_length_table() {
    let config = load_config(PLATE_CONFIG).unwrap();
    assert_eq!(config.length, MeasurementConfig::default().length);
    assert_eq!(config.angle.pairs, MeasurementConfig::default().angle.pairs);
    assert_eq!(config.perpendicular.pairs.len(), 3);
}

#[test]
fn plate_lengths() {
    let config = load_config(PLATE_CONFIG).unwrap();
    let spheres = plate_spheres();
    let names: Vec<&str> = spheres.iter().map(|s| s.name.as_str()).collect();
    let pairs = enumerate_pairs(&names, &config.length.default_strategy());
    assert_eq!(pairs.len(), 9);

    let reports = inspect_lengths(&spheres, &pairs, &InspectionPlan::full(config));
    let summary = summarize(&reports);
    assert_eq!(summary.good, 8);
    assert_eq!(summary.warning, 1);
    assert_eq!(summary.failed, 0);

    let l3_6 = reports.iter().find(|r| r.pair.first == "3" && r.pair.second == "6").unwrap();
    let m = &l3_6.outcome.as_ref().unwrap().measurement;
    assert_eq!(m.label, "L3_6");
    assert_abs_diff_eq!(m.actual, 7.65, epsilon = 1e-9);
    assert_abs_diff_eq!(m.deviation.unwrap(), 0.05, epsilon = 1e-9);
    assert_eq!(m.status, Some(ToleranceStatus::Warning));
}

#[test]
fn plate_sequential_lengths_in_simple_mode() {
    let spheres = plate_spheres();
    let names: Vec<&str> = spheres.iter().map(|s| s.name.as_str()).collect();
    let pairs = enumerate_pairs(&names, &PairStrategy::Sequential);
    assert_eq!(pairs.len(), 9);

    let reports = inspect_lengths(&spheres, &pairs, &InspectionPlan::simple());
    let summary = summarize(&reports);
    assert_eq!(summary.unevaluated, 9);
    let first = reports[0].outcome.as_ref().unwrap();
    assert_abs_diff_eq!(first.measurement.actual, 8.5, epsilon = 1e-12);
    assert_eq!(first.measurement.color(), [0.0, 0.0, 1.0]);
}

#[test]
fn plate_angles() {
    let config = load_config(PLATE_CONFIG).unwrap();
    let spheres = plate_spheres();
    let lines = plate_lines(&spheres, &config);
    let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
    let pairs = enumerate_pairs(&names, &config.angle.default_strategy());
    assert_eq!(pairs.len(), 9);

    let reports = inspect_angles(&lines, &pairs, &InspectionPlan::full(config));
    let summary = summarize(&reports);
    assert_eq!(summary.good, 9, "{summary}");

    // L1_2 and L1_4 share sphere 1, so the arc is centered on it.
    let corner = reports[0].outcome.as_ref().unwrap();
    assert_eq!(corner.anchors.source, AnchorSource::Intersection);
    assert_abs_diff_eq!(corner.anchors.center.distance_to(&pt(0.0, 0.0, 0.0)), 0.0, epsilon = 1e-9);
    let arc = corner.arc.as_ref().unwrap();
    assert_eq!(arc.name, "Arc_L1_2_L1_4");
    assert_eq!(arc.points.len(), 91);
    assert_abs_diff_eq!(arc.radius, 7.6 / 3.0, epsilon = 1e-12);

    // L1_2 ends well before sphere 8, so its pair with L8_10 falls back.
    let apart = reports[1].outcome.as_ref().unwrap();
    assert_eq!(apart.anchors.source, AnchorSource::ClosestEndpoints);
    assert_abs_diff_eq!(apart.anchors.center.distance_to(&pt(14.25, 0.0, 0.0)), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(apart.measurement.actual, 45.0, epsilon = 1e-9);
}

#[test]
fn plate_perpendiculars() {
    let config = load_config(PLATE_CONFIG).unwrap();
    let spheres = plate_spheres();
    let lines = plate_lines(&spheres, &config);
    let pairs: Vec<CrossPair> = config
        .perpendicular
        .pairs
        .iter()
        .map(|(point, line)| CrossPair { point: point.clone(), line: line.clone() })
        .collect();

    let reports = inspect_perpendiculars(&spheres, &lines, &pairs, &InspectionPlan::full(config));
    assert_eq!(summarize(&reports).good, 3);

    let six = reports[2].outcome.as_ref().unwrap();
    assert_eq!(six.measurement.label, "Perp_6_L1_2");
    assert_abs_diff_eq!(six.perpendicular.foot.distance_to(&pt(16.1, 0.0, 0.0)), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(six.label_anchor.distance_to(&pt(16.1, 3.825, 0.0)), 0.0, epsilon = 1e-9);
}

#[test]
fn leading_cross_pairs_on_plate() {
    let spheres = plate_spheres();
    let config = MeasurementConfig::default();
    let lines = plate_lines(&spheres, &config);
    let sphere_names: Vec<&str> = spheres.iter().map(|s| s.name.as_str()).collect();
    let line_names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();

    let pairs = enumerate_cross_pairs(&sphere_names, &line_names, &CrossStrategy::default());
    assert_eq!(pairs.len(), 6);

    // Spheres 1..3 all sit on the line through 1 and 2.
    let reports = inspect_perpendiculars(&spheres, &lines, &pairs, &InspectionPlan::simple());
    for report in reports.iter().filter(|r| r.pair.line == "L1_2") {
        let distance = report.outcome.as_ref().unwrap().perpendicular.distance;
        assert_abs_diff_eq!(distance, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn missing_entities_fail_only_their_pair() {
    let spheres = plate_spheres();
    let pairs = enumerate_pairs(
        &["1", "2", "11"],
        &PairStrategy::Default(vec![("1".into(), "2".into()), ("2".into(), "11".into())]),
    );
    assert_eq!(pairs.len(), 2);

    let reports = inspect_lengths(&spheres, &pairs, &InspectionPlan::simple());
    assert!(reports[0].outcome.is_ok());
    assert_eq!(reports[1].outcome, Err(MeasureError::UnknownEntity("11".into())));
}

#[test]
fn sub_floor_arc_resolution_is_refused_at_load() {
    let json = r#"{"format": "metrology-config", "version": 1, "arc": {"resolution_degrees": 1e-15}}"#;
    assert!(matches!(load_config(json), Err(ConfigError::InvalidArcOptions(_))));
}
