//! Camera orientation representation and Rodrigues conversions.
//!
//! An orientation is stored canonically as a 3x3 orthonormal rotation
//! matrix. Angle triplets `[rx, ry, rz]` in degrees are interpreted as ONE
//! combined axis-angle rotation vector after conversion to radians
//! (magnitude = angle, direction = axis), not as three sequential axis
//! rotations. This matches the keyframe convention of the host plugin and
//! is deliberate; switching to Euler composition would change the meaning
//! of every stored keyframe.

use crate::error::{EngineError, EngineResult};
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Tolerance for the orthonormality check on raw matrices.
const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// A camera orientation, canonically a 3x3 orthonormal rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation(Rotation3<f64>);

impl Orientation {
    /// The zero rotation.
    pub fn identity() -> Self {
        Self(Rotation3::identity())
    }

    /// Build an orientation from an angle triplet in degrees.
    ///
    /// The triplet is treated as a single combined rotation vector and
    /// exponentiated via the Rodrigues formula (see the module docs).
    ///
    /// # Errors
    /// `InvalidInput` if any component is non-finite.
    pub fn from_angles_deg(angles: [f64; 3]) -> EngineResult<Self> {
        if angles.iter().any(|a| !a.is_finite()) {
            return Err(EngineError::invalid_input(format!(
                "Rotation angles must be finite, got {angles:?}"
            )));
        }

        let rvec = Vector3::new(
            angles[0].to_radians(),
            angles[1].to_radians(),
            angles[2].to_radians(),
        );
        Ok(Self::from_rotation_vector(rvec))
    }

    /// Build an orientation from an axis-angle rotation vector (radians).
    pub fn from_rotation_vector(rvec: Vector3<f64>) -> Self {
        Self(Rotation3::from_scaled_axis(rvec))
    }

    /// Build an orientation from a raw 3x3 matrix.
    ///
    /// # Errors
    /// `InvalidInput` if the matrix is not orthonormal with determinant
    /// close to 1.
    pub fn from_matrix(matrix: &Matrix3<f64>) -> EngineResult<Self> {
        let gram = matrix * matrix.transpose();
        let orthonormal = (gram - Matrix3::identity()).norm() < ORTHONORMAL_TOLERANCE;
        let proper = (matrix.determinant() - 1.0).abs() < ORTHONORMAL_TOLERANCE;

        if !orthonormal || !proper {
            return Err(EngineError::invalid_input(
                "Orientation matrix must be orthonormal with determinant 1",
            ));
        }

        Ok(Self(Rotation3::from_matrix_unchecked(*matrix)))
    }

    /// Convert back to an angle triplet in degrees via the matrix logarithm.
    ///
    /// Round-trips with [`Orientation::from_angles_deg`] within 1e-3 degrees
    /// while the combined rotation vector stays inside a half-turn radius;
    /// beyond that the logarithm returns the equivalent principal rotation.
    pub fn to_angles_deg(&self) -> [f64; 3] {
        let rvec = self.0.scaled_axis();
        [
            rvec.x.to_degrees(),
            rvec.y.to_degrees(),
            rvec.z.to_degrees(),
        ]
    }

    /// The axis-angle rotation vector in radians.
    pub fn rotation_vector(&self) -> Vector3<f64> {
        self.0.scaled_axis()
    }

    /// The canonical 3x3 rotation matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        *self.0.matrix()
    }
}

/// Component-wise linear interpolation of two rotation vectors.
///
/// This interpolates along the straight line between the two points in
/// rotation-vector space, not along the geodesic on the rotation manifold.
/// It is cheap and visually adequate for the small angular deltas of clip
/// transitions; a constant-angular-velocity variant can replace it behind
/// the same `interpolate_poses` contract.
pub fn interpolate_rotation_vectors(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    t: f64,
) -> Vector3<f64> {
    a.lerp(b, t)
}
