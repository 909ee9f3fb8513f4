//! Geometric measurement and classification kernel for sphere/line
//! metrology: lengths, acute angles, perpendicular projections, angle arcs
//! and three-tier tolerance status.
//!
//! Every entry point is a pure function of its arguments. Entity
//! collections are passed in explicitly; nothing is kept between calls.

pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod inspection;
pub mod measure;
pub mod measurement;
pub mod pairs;
pub mod traits;

// Re-export the public surface at crate root for convenience.
pub use classify::{classify, ToleranceStatus, ToleranceThresholds};
pub use config::{load_config, load_config_file, save_config, ConfigError, KindConfig, MeasurementConfig, NominalTable};
pub use error::{MeasureError, MeasureResult};
pub use geometry::point::Point3d;
pub use geometry::segment::{LineSegment, Sphere};
pub use geometry::vector::Vec3;
pub use inspection::{
    inspect_angles, inspect_angles_with, inspect_lengths, inspect_perpendiculars, summarize, AnalysisMode,
    InspectionPlan, InspectionSummary, PairReport,
};
pub use measure::anchors::{resolve_arc_anchors, resolve_arc_anchors_with, AnchorSource, ArcAnchors};
pub use measure::angle::compute_angle;
pub use measure::arc::{build_arc, build_arc_with, Arc, ArcOptions, MIN_ARC_RESOLUTION_DEGREES};
pub use measure::distance::{compute_length, compute_perpendicular, Perpendicular};
pub use measurement::{MeasureKind, Measurement};
pub use pairs::{
    enumerate_cross_pairs, enumerate_pairs, upper_triangle, CrossPair, CrossStrategy, EntityPair, PairStrategy,
    PairToggles, SelectionStrategy,
};
pub use traits::{DefaultGeometryProvider, GeometryProvider};

/// Tolerances for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Points closer than this are coincident; also the minimum length of a
    /// usable measurement line (document units).
    pub coincidence: f64,
    /// Two lines whose closest approach is below this are taken to meet.
    pub intersection: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-3,
            intersection: 1e-6,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}

pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
