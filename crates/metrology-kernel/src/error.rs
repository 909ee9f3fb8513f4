//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Per-pair measurement failure.
///
/// Every calculator reports failure for its own pair only; callers skip the
/// pair and continue with the rest. Computations are deterministic, so a
/// failed pair fails identically on retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// Line endpoints are (nearly) coincident, so it has no direction.
    #[error("line '{name}' is degenerate (length {length:.6})")]
    DegenerateLine { name: String, length: f64 },

    /// Arc center coincides with one of its direction points.
    #[error("arc center and direction point are too close ({distance:.6})")]
    CoincidentPoints { distance: f64 },

    /// Arc radius falls below the coincidence tolerance.
    #[error("arc radius too small ({radius:.6})")]
    RadiusTooSmall { radius: f64 },

    /// Angle between the arc directions is too small to draw.
    #[error("arc angle negligible ({degrees:.4} degrees)")]
    NegligibleAngle { degrees: f64 },

    /// Angle between the arc directions spans a full circle.
    #[error("arc angle is a full circle ({degrees:.4} degrees)")]
    FullCircle { degrees: f64 },

    /// Alignment points are collinear and do not define a frame.
    #[error("alignment points do not define a frame")]
    DegenerateFrame,

    /// Option value out of its valid range.
    #[error("invalid option {option}: {value}")]
    InvalidOption { option: &'static str, value: f64 },

    /// An input point has a NaN or infinite coordinate.
    #[error("'{0}' has non-finite coordinates")]
    NonFinite(String),

    /// A pair names an entity absent from the input collection.
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),
}

impl MeasureError {
    pub fn degenerate_line(name: impl Into<String>, length: f64) -> Self {
        Self::DegenerateLine {
            name: name.into(),
            length,
        }
    }

    pub fn non_finite(name: impl Into<String>) -> Self {
        Self::NonFinite(name.into())
    }

    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }
}
