//! Raw measurements between primitives and the angle-arc geometry.
//!
//! - `angle`: acute-folded angle between two lines
//! - `distance`: point-to-point length and point-to-line perpendicular
//! - `anchors`: arc center and direction points for a line pair
//! - `arc`: sampled arc polyline placed by rigid alignment

pub mod anchors;
pub mod angle;
pub mod arc;
pub mod distance;
