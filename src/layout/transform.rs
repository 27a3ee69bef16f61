//! Linear transformations that put a raw spring embedding into canonical form.
//!
//! A spring simulation is only defined up to translation, scale and rotation.
//! This module removes those freedoms:
//! 1. **Normalization**: the centroid of the real nodes moves to the origin
//!    and the farthest real node lands on the unit circle
//! 2. **Principal axis alignment**: the direction of largest variance is
//!    rotated onto the 45° diagonal and the drawing is scaled
//! 3. **User alignment**: an extra rotation moves the diagonal to the
//!    requested angle
//!
//! ## Rotation Convention
//!
//! Angles are in degrees, counter-clockwise positive, with the y axis
//! pointing up (the TikZ convention).
//! - 0° = no rotation
//! - 90° = the positive x axis turns into the positive y axis

use nalgebra::{Matrix2, SymmetricEigen, Vector2};
use tracing::debug;

use crate::layout::types::Point;

/// Below this, a spread or eigenvalue is treated as zero
const EPSILON: f64 = 1e-12;

/// Relative eigenvalue gap below which the principal axis is arbitrary
const ISOTROPY_TOLERANCE: f64 = 1e-9;

/// Gain of the principal axis matrix; close to 1/sqrt(2) so the axis keeps
/// roughly unit length once rotated onto the diagonal
const PRINCIPAL_AXIS_GAIN: f64 = 0.7;

/// A 2D linear map applied to every layout point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    pub matrix: Matrix2<f64>,
}

impl LinearTransform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix2::identity(),
        }
    }

    /// Uniform scaling
    pub fn scaling(factor: f64) -> Self {
        Self {
            matrix: Matrix2::identity() * factor,
        }
    }

    /// Counter-clockwise rotation by `angle_degrees`
    ///
    /// ```text
    /// [cos  -sin]
    /// [sin   cos]
    /// ```
    pub fn rotation(angle_degrees: f64) -> Self {
        let radians = angle_degrees.to_radians();
        let (sin_a, cos_a) = radians.sin_cos();
        Self {
            matrix: Matrix2::new(cos_a, -sin_a, sin_a, cos_a),
        }
    }

    /// Rotate the principal axis of `points` onto the 45° diagonal and scale by `scale`.
    ///
    /// The axis is the eigenvector of the largest eigenvalue of the sample
    /// covariance. Its sign is fixed (non-negative x, or positive y when x is
    /// zero) so the result does not depend on the eigen-solver. When the
    /// covariance is non-finite, vanishes, or has two equal eigenvalues the
    /// axis is undefined and the transform falls back to plain scaling.
    pub fn principal_axis(points: &[Vector2<f64>], scale: f64) -> Self {
        let Some(axis) = principal_direction(points) else {
            debug!(points = points.len(), "principal axis undefined, using identity rotation");
            return Self::scaling(scale);
        };

        let (x, y) = (axis.x, axis.y);
        let gain = PRINCIPAL_AXIS_GAIN * scale;
        Self {
            matrix: Matrix2::new(x + y, y - x, x - y, x + y) * gain,
        }
    }

    /// Apply `self` first, then `next`
    pub fn then(self, next: LinearTransform) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    pub fn is_identity(&self) -> bool {
        (self.matrix - Matrix2::identity()).amax() < f64::EPSILON
    }

    pub fn apply(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.matrix * v
    }

    pub fn transform_point(&self, point: Point) -> Point {
        self.apply(point.into()).into()
    }
}

impl Default for LinearTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Unit eigenvector of the largest covariance eigenvalue, if well defined
pub fn principal_direction(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    let covariance = covariance(points)?;
    if !covariance.iter().all(|v| v.is_finite()) {
        return None;
    }

    let eigen = SymmetricEigen::new(covariance);
    let (major, minor) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let largest = eigen.eigenvalues[major];
    let smallest = eigen.eigenvalues[minor];
    if !largest.is_finite() || largest <= EPSILON {
        return None;
    }
    if largest - smallest <= ISOTROPY_TOLERANCE * largest {
        return None;
    }

    let mut axis: Vector2<f64> = eigen.eigenvectors.column(major).into_owned();
    let norm = axis.norm();
    if norm <= EPSILON {
        return None;
    }
    axis /= norm;
    if axis.x < 0.0 || (axis.x == 0.0 && axis.y < 0.0) {
        axis = -axis;
    }
    Some(axis)
}

/// Sample covariance with `n - 1` normalization; `None` for fewer than two points
fn covariance(points: &[Vector2<f64>]) -> Option<Matrix2<f64>> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean = points
        .iter()
        .fold(Vector2::<f64>::zeros(), |acc, p| acc + p)
        / n;
    let sum = points.iter().fold(Matrix2::<f64>::zeros(), |acc, p| {
        let d = p - mean;
        acc + d * d.transpose()
    });
    Some(sum / (n - 1.0))
}

/// Translate the first `real_count` points' centroid to the origin and scale
/// so the farthest of them sits at distance 1. All points move together.
///
/// When every real point coincides the scale step is skipped.
pub fn normalize(points: &mut [Vector2<f64>], real_count: usize) {
    let real_count = real_count.min(points.len());
    if real_count == 0 {
        return;
    }

    let centroid = points[..real_count]
        .iter()
        .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p)
        / real_count as f64;
    for p in points.iter_mut() {
        *p -= centroid;
    }

    let radius = points[..real_count]
        .iter()
        .map(|p| p.norm())
        .fold(0.0_f64, f64::max);
    if radius <= EPSILON {
        debug!("all real nodes coincide, skipping unit scaling");
        return;
    }
    for p in points.iter_mut() {
        *p /= radius;
    }
}
