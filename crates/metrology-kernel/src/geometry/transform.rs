use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;
use crate::error::{MeasureError, MeasureResult};

/// A 4x4 affine transformation matrix stored in column-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Column-major 4x4 matrix entries.
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    pub fn translation(v: Vec3) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            v.x, v.y, v.z, 1.0,
        ];
        Self { m }
    }

    /// Linear part taken from a 3x3 matrix, no translation.
    pub fn from_linear(r: &Matrix3<f64>) -> Self {
        #[rustfmt::skip]
        let m = [
            r[(0, 0)], r[(1, 0)], r[(2, 0)], 0.0,
            r[(0, 1)], r[(1, 1)], r[(2, 1)], 0.0,
            r[(0, 2)], r[(1, 2)], r[(2, 2)], 0.0,
            0.0,       0.0,       0.0,       1.0,
        ];
        Self { m }
    }

    /// Matrix element access (row, col), 0-indexed.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// The upper-left 3x3 block.
    pub fn linear(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|row, col| self.at(row, col))
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        let offset = Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3));
        Point3d::ORIGIN + Vec3::from(self.linear() * Vector3::from(p.to_vec3())) + offset
    }

    /// Compose two transforms: self * other (`other` applies first).
    pub fn then(&self, other: &Transform) -> Transform {
        let mut result = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[col * 4 + row] = (0..4).map(|k| self.at(row, k) * other.at(k, col)).sum();
            }
        }
        Transform { m: result }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Orthonormal frame of three points as matrix columns `[e1, e2, e3]`:
/// `e1` toward `p1`, `e2` in the plane on `p2`'s side, `e3 = e1 x e2`.
fn orthonormal_frame(p0: &Point3d, p1: &Point3d, p2: &Point3d) -> Option<Matrix3<f64>> {
    let u = *p1 - *p0;
    let w = *p2 - *p0;
    let e1 = u.normalized()?;
    let n = u.cross(&w);
    if n.length() <= 1e-12 * u.length() * w.length() {
        return None;
    }
    let e3 = n.normalized()?;
    let e2 = e3.cross(&e1);
    Some(Matrix3::from_columns(&[
        Vector3::from(e1),
        Vector3::from(e2),
        Vector3::from(e3),
    ]))
}

/// Rigid transform taking the frame of `src` onto the frame of `dst`.
///
/// `src[0]` lands exactly on `dst[0]`; the ray `src[0]→src[1]` lands on the
/// ray `dst[0]→dst[1]`; the plane of `src` lands on the plane of `dst` with
/// `src[2]` on the same side as `dst[2]`. Distances are preserved, so the
/// second and third points only coincide when the triangles are congruent.
pub fn rigid_align(src: [Point3d; 3], dst: [Point3d; 3]) -> MeasureResult<Transform> {
    let fs = orthonormal_frame(&src[0], &src[1], &src[2]).ok_or(MeasureError::DegenerateFrame)?;
    let fd = orthonormal_frame(&dst[0], &dst[1], &dst[2]).ok_or(MeasureError::DegenerateFrame)?;
    // Both frames are orthonormal, so the inverse of fs is its transpose.
    let rotation = fd * fs.transpose();

    Ok(Transform::translation(dst[0].to_vec3())
        .then(&Transform::from_linear(&rotation))
        .then(&Transform::translation(-src[0].to_vec3())))
}
