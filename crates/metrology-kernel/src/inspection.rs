//! Batch inspection of entity pairs.
//!
//! Each pair is measured independently. A pair that names a missing entity
//! or a degenerate line fails on its own and the batch carries on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::classify::ToleranceStatus;
use crate::config::{KindConfig, MeasurementConfig};
use crate::error::{MeasureError, MeasureResult};
use crate::geometry::point::Point3d;
use crate::geometry::segment::{LineSegment, Sphere};
use crate::measure::anchors::{resolve_arc_anchors_with, ArcAnchors};
use crate::measure::angle::compute_angle;
use crate::measure::arc::{build_arc_with, Arc};
use crate::measure::distance::{compute_length, compute_perpendicular, Perpendicular};
use crate::measurement::{MeasureKind, Measurement};
use crate::pairs::{CrossPair, EntityPair};
use crate::traits::{DefaultGeometryProvider, GeometryProvider};

/// Whether measurements are compared against nominal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Actual values only.
    Simple,
    /// Actual, nominal, deviation and tolerance status.
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionPlan {
    pub mode: AnalysisMode,
    pub config: MeasurementConfig,
}

impl InspectionPlan {
    pub fn simple() -> Self {
        Self {
            mode: AnalysisMode::Simple,
            config: MeasurementConfig::default(),
        }
    }

    pub fn full(config: MeasurementConfig) -> Self {
        Self {
            mode: AnalysisMode::Full,
            config,
        }
    }

    fn finish(&self, kind: MeasureKind, measurement: Measurement, first: &str, second: &str) -> Measurement {
        match self.mode {
            AnalysisMode::Simple => measurement,
            AnalysisMode::Full => {
                let settings = self.config.kind(kind);
                measurement.evaluate(settings.nominal_for(first, second), &settings.thresholds)
            }
        }
    }

    fn check_thresholds(&self, kind: MeasureKind) {
        let KindConfig { thresholds, .. } = self.config.kind(kind);
        if self.mode == AnalysisMode::Full && !thresholds.is_ordered() {
            warn!(%kind, good = thresholds.good, warning = thresholds.warning, "good threshold exceeds warning threshold");
        }
    }
}

impl Default for InspectionPlan {
    fn default() -> Self {
        Self::simple()
    }
}

/// Outcome of one pair, alongside the pair as it was selected.
///
/// Perpendicular batches carry a [`CrossPair`] instead of an [`EntityPair`].
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport<T, K = EntityPair> {
    pub pair: K,
    pub outcome: MeasureResult<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LengthReport {
    pub measurement: Measurement,
    /// Midpoint of the two sphere centers.
    pub label_anchor: Point3d,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AngleReport {
    pub measurement: Measurement,
    pub anchors: ArcAnchors,
    /// Visual arc. Its failure does not affect the measurement.
    pub arc: MeasureResult<Arc>,
    /// Arc midpoint, or the midpoint between both line midpoints.
    pub label_anchor: Point3d,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerpendicularReport {
    pub measurement: Measurement,
    pub perpendicular: Perpendicular,
    /// Midpoint of the sphere center and its foot.
    pub label_anchor: Point3d,
}

/// Access to the measurement held by a report.
pub trait Measured {
    fn measurement(&self) -> &Measurement;
}

impl Measured for LengthReport {
    fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}

impl Measured for AngleReport {
    fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}

impl Measured for PerpendicularReport {
    fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}

fn index_by_name<'a, T>(items: &'a [T], name: impl Fn(&T) -> &str) -> HashMap<&'a str, &'a T> {
    items.iter().map(|item| (name(item), item)).collect()
}

fn lookup<'a, T>(index: &HashMap<&str, &'a T>, name: &str) -> MeasureResult<&'a T> {
    index.get(name).copied().ok_or_else(|| MeasureError::unknown_entity(name))
}

fn log_failures<T, K: std::fmt::Debug>(reports: &[PairReport<T, K>]) {
    for report in reports {
        if let Err(err) = &report.outcome {
            warn!(pair = ?report.pair, error = %err, "pair skipped");
        }
    }
}

fn measure_length(
    index: &HashMap<&str, &Sphere>,
    pair: &EntityPair,
    plan: &InspectionPlan,
) -> MeasureResult<LengthReport> {
    let a = lookup(index, &pair.first)?;
    let b = lookup(index, &pair.second)?;
    let label = format!("L{}_{}", pair.first, pair.second);
    let measurement = Measurement::new(MeasureKind::Length, label, compute_length(&a.center, &b.center));
    Ok(LengthReport {
        measurement: plan.finish(MeasureKind::Length, measurement, &pair.first, &pair.second),
        label_anchor: a.center.midpoint(&b.center),
    })
}

/// Measure center-to-center distances between sphere pairs.
#[instrument(skip_all, fields(pairs = pairs.len(), mode = ?plan.mode))]
pub fn inspect_lengths(spheres: &[Sphere], pairs: &[EntityPair], plan: &InspectionPlan) -> Vec<PairReport<LengthReport>> {
    plan.check_thresholds(MeasureKind::Length);
    let index = index_by_name(spheres, |s: &Sphere| s.name.as_str());

    let reports: Vec<_> = pairs
        .iter()
        .map(|pair| PairReport {
            pair: pair.clone(),
            outcome: measure_length(&index, pair, plan),
        })
        .collect();

    log_failures(&reports);
    info!(summary = %summarize(&reports), "lengths inspected");
    reports
}

/// Measure acute angles between line pairs, with their visual arcs.
pub fn inspect_angles(lines: &[LineSegment], pairs: &[EntityPair], plan: &InspectionPlan) -> Vec<PairReport<AngleReport>> {
    inspect_angles_with(&DefaultGeometryProvider::default(), lines, pairs, plan)
}

fn measure_angle<P: GeometryProvider + ?Sized>(
    provider: &P,
    index: &HashMap<&str, &LineSegment>,
    pair: &EntityPair,
    plan: &InspectionPlan,
) -> MeasureResult<AngleReport> {
    let a = lookup(index, &pair.first)?;
    let b = lookup(index, &pair.second)?;
    let angle = compute_angle(a, b)?;
    let label = format!("A_{}_{}", pair.first, pair.second);
    let measurement = Measurement::new(MeasureKind::Angle, label, angle);

    let anchors = resolve_arc_anchors_with(provider, a, b);
    let arc = build_arc_with(
        provider,
        &plan.config.arc,
        &anchors.center,
        &anchors.toward_a,
        &anchors.toward_b,
        &format!("Arc_{}_{}", pair.first, pair.second),
    );
    if let Err(err) = &arc {
        debug!(first = %pair.first, second = %pair.second, error = %err, "no arc for angle");
    }

    let label_anchor = arc
        .as_ref()
        .ok()
        .and_then(Arc::midpoint)
        .unwrap_or_else(|| a.midpoint().midpoint(&b.midpoint()));

    Ok(AngleReport {
        measurement: plan.finish(MeasureKind::Angle, measurement, &pair.first, &pair.second),
        anchors,
        arc,
        label_anchor,
    })
}

#[instrument(skip_all, fields(pairs = pairs.len(), mode = ?plan.mode))]
pub fn inspect_angles_with<P: GeometryProvider + ?Sized>(
    provider: &P,
    lines: &[LineSegment],
    pairs: &[EntityPair],
    plan: &InspectionPlan,
) -> Vec<PairReport<AngleReport>> {
    plan.check_thresholds(MeasureKind::Angle);
    let index = index_by_name(lines, |l: &LineSegment| l.name.as_str());

    let reports: Vec<_> = pairs
        .iter()
        .map(|pair| PairReport {
            pair: pair.clone(),
            outcome: measure_angle(provider, &index, pair, plan),
        })
        .collect();

    log_failures(&reports);
    info!(summary = %summarize(&reports), "angles inspected");
    reports
}

fn measure_perpendicular(
    spheres: &HashMap<&str, &Sphere>,
    lines: &HashMap<&str, &LineSegment>,
    pair: &CrossPair,
    plan: &InspectionPlan,
) -> MeasureResult<PerpendicularReport> {
    let sphere = lookup(spheres, &pair.point)?;
    let line = lookup(lines, &pair.line)?;
    let perpendicular = compute_perpendicular(&sphere.center, line)?;
    let label = format!("Perp_{}_{}", pair.point, pair.line);
    let measurement = Measurement::new(MeasureKind::Perpendicular, label, perpendicular.distance);
    Ok(PerpendicularReport {
        measurement: plan.finish(MeasureKind::Perpendicular, measurement, &pair.point, &pair.line),
        perpendicular,
        label_anchor: sphere.center.midpoint(&perpendicular.foot),
    })
}

/// Measure perpendicular distances from sphere centers to lines.
#[instrument(skip_all, fields(pairs = pairs.len(), mode = ?plan.mode))]
pub fn inspect_perpendiculars(
    spheres: &[Sphere],
    lines: &[LineSegment],
    pairs: &[CrossPair],
    plan: &InspectionPlan,
) -> Vec<PairReport<PerpendicularReport, CrossPair>> {
    plan.check_thresholds(MeasureKind::Perpendicular);
    let sphere_index = index_by_name(spheres, |s: &Sphere| s.name.as_str());
    let line_index = index_by_name(lines, |l: &LineSegment| l.name.as_str());

    let reports: Vec<_> = pairs
        .iter()
        .map(|pair| PairReport {
            pair: pair.clone(),
            outcome: measure_perpendicular(&sphere_index, &line_index, pair, plan),
        })
        .collect();

    log_failures(&reports);
    info!(summary = %summarize(&reports), "perpendiculars inspected");
    reports
}

/// Counts per tolerance status over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionSummary {
    pub good: usize,
    pub warning: usize,
    pub error: usize,
    /// Measured without a nominal (simple mode).
    pub unevaluated: usize,
    /// Pairs that produced no measurement.
    pub failed: usize,
}

impl InspectionSummary {
    pub fn total(&self) -> usize {
        self.good + self.warning + self.error + self.unevaluated + self.failed
    }

    /// Share of evaluated measurements within the good threshold.
    pub fn pass_rate(&self) -> Option<f64> {
        let evaluated = self.good + self.warning + self.error;
        (evaluated > 0).then(|| self.good as f64 / evaluated as f64)
    }
}

impl std::fmt::Display for InspectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} good, {} warning, {} error, {} unevaluated, {} failed",
            self.good, self.warning, self.error, self.unevaluated, self.failed
        )
    }
}

pub fn summarize<T: Measured, K>(reports: &[PairReport<T, K>]) -> InspectionSummary {
    let mut summary = InspectionSummary::default();
    for report in reports {
        match &report.outcome {
            Err(_) => summary.failed += 1,
            Ok(r) => match r.measurement().status {
                Some(ToleranceStatus::Good) => summary.good += 1,
                Some(ToleranceStatus::Warning) => summary.warning += 1,
                Some(ToleranceStatus::Error) => summary.error += 1,
                None => summary.unevaluated += 1,
            },
        }
    }
    summary
}
