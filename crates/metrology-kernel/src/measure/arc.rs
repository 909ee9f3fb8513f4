use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{MeasureError, MeasureResult};
use crate::geometry::point::Point3d;
use crate::traits::{DefaultGeometryProvider, GeometryProvider};

/// Finest accepted angular step between arc samples (degrees). A sweep
/// never exceeds 180 degrees, so an arc holds at most 18_001 samples.
pub const MIN_ARC_RESOLUTION_DEGREES: f64 = 0.01;

/// Sampling and validity limits for angle arcs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcOptions {
    /// Angular step between consecutive samples (degrees).
    pub resolution_degrees: f64,
    /// Arcs sweeping less than this are rejected (degrees).
    pub min_angle_degrees: f64,
    /// Arcs sweeping more than this are rejected (degrees).
    pub max_angle_degrees: f64,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self {
            resolution_degrees: 1.0,
            min_angle_degrees: 0.1,
            max_angle_degrees: 359.9,
        }
    }
}

impl ArcOptions {
    /// Reject a resolution below [`MIN_ARC_RESOLUTION_DEGREES`] and angle
    /// limits that are non-finite, negative or misordered.
    pub fn validate(&self) -> MeasureResult<()> {
        let resolution = self.resolution_degrees;
        if !(resolution.is_finite() && resolution >= MIN_ARC_RESOLUTION_DEGREES) {
            return Err(MeasureError::InvalidOption {
                option: "resolution_degrees",
                value: resolution,
            });
        }
        if !(self.min_angle_degrees.is_finite() && self.min_angle_degrees >= 0.0) {
            return Err(MeasureError::InvalidOption {
                option: "min_angle_degrees",
                value: self.min_angle_degrees,
            });
        }
        if !(self.max_angle_degrees.is_finite() && self.max_angle_degrees >= self.min_angle_degrees) {
            return Err(MeasureError::InvalidOption {
                option: "max_angle_degrees",
                value: self.max_angle_degrees,
            });
        }
        Ok(())
    }
}

/// Polyline approximation of a circular arc visualizing an angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub name: String,
    pub center: Point3d,
    pub toward_a: Point3d,
    pub toward_b: Point3d,
    pub radius: f64,
    /// Unsigned angle between the two directions (degrees).
    pub sweep_degrees: f64,
    /// Samples from the `toward_a` direction to the `toward_b` direction.
    pub points: Vec<Point3d>,
}

impl Arc {
    /// Total polyline length.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    /// Point at half the polyline length; the middle sample if the
    /// polyline has no length. None for an empty polyline.
    pub fn midpoint(&self) -> Option<Point3d> {
        let total = self.length();
        if total <= 0.0 {
            return self.points.get(self.points.len() / 2).copied();
        }
        let mut remaining = total / 2.0;
        for w in self.points.windows(2) {
            let step = w[0].distance_to(&w[1]);
            if step > 0.0 && remaining <= step {
                return Some(w[0].lerp(&w[1], remaining / step));
            }
            remaining -= step;
        }
        self.points.last().copied()
    }
}

/// Build an arc with the in-crate provider and default options.
pub fn build_arc(center: &Point3d, toward_a: &Point3d, toward_b: &Point3d, name: &str) -> MeasureResult<Arc> {
    build_arc_with(
        &DefaultGeometryProvider::default(),
        &ArcOptions::default(),
        center,
        toward_a,
        toward_b,
        name,
    )
}

/// Sample an arc of radius `min(|C-A|, |C-B|) / 3` around `center`, swept
/// from the direction of `toward_a` to the direction of `toward_b`.
///
/// The arc is laid out in a local xy frame starting on +x and placed in
/// world space by aligning `{origin, +x, +y}` onto `{center, toward_a,
/// toward_b}`. With the default 1 degree resolution the polyline holds
/// `floor(A) + 1` points for a sweep of `A` degrees.
#[instrument(skip(provider, options, center, toward_a, toward_b))]
pub fn build_arc_with<P: GeometryProvider + ?Sized>(
    provider: &P,
    options: &ArcOptions,
    center: &Point3d,
    toward_a: &Point3d,
    toward_b: &Point3d,
    name: &str,
) -> MeasureResult<Arc> {
    options.validate()?;
    for point in [center, toward_a, toward_b] {
        if !point.is_finite() {
            return Err(MeasureError::non_finite(name));
        }
    }

    let tol = crate::default_tolerance();
    let dist_a = center.distance_to(toward_a);
    let dist_b = center.distance_to(toward_b);
    if tol.is_zero_length(dist_a) {
        return Err(MeasureError::CoincidentPoints { distance: dist_a });
    }
    if tol.is_zero_length(dist_b) {
        return Err(MeasureError::CoincidentPoints { distance: dist_b });
    }

    let radius = dist_a.min(dist_b) / 3.0;
    if tol.is_zero_length(radius) {
        return Err(MeasureError::RadiusTooSmall { radius });
    }

    let sweep = (*toward_a - *center)
        .angle_to(&(*toward_b - *center))
        .map_or(0.0, f64::to_degrees);
    if sweep < options.min_angle_degrees {
        return Err(MeasureError::NegligibleAngle { degrees: sweep });
    }
    if sweep > options.max_angle_degrees {
        return Err(MeasureError::FullCircle { degrees: sweep });
    }

    let steps = (sweep / options.resolution_degrees).floor() as usize;
    let placement = provider.align(
        [Point3d::ORIGIN, Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 0.0)],
        [*center, *toward_a, *toward_b],
    )?;

    let points: Vec<Point3d> = (0..=steps)
        .map(|i| {
            let theta = (i as f64 * options.resolution_degrees).to_radians();
            let local = Point3d::new(radius * theta.cos(), radius * theta.sin(), 0.0);
            provider.apply(&placement, &local)
        })
        .collect();

    debug!(radius, sweep, samples = points.len(), "arc sampled");

    Ok(Arc {
        name: name.to_string(),
        center: *center,
        toward_a: *toward_a,
        toward_b: *toward_b,
        radius,
        sweep_degrees: sweep,
        points,
    })
}
