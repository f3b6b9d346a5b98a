//! Pinhole camera intrinsics and planar homographies.
//!
//! The intrinsics use the plugin's simplifying assumption: focal length
//! equal to the frame width, principal point at the frame centre. A camera
//! rotation R is applied to a 2D frame through the planar homography
//! `K * R * K^-1`, which is exact for a camera rotating in place while
//! viewing a distant planar scene.

use crate::error::{EngineError, EngineResult};
use crate::rotation::Orientation;
use nalgebra::Matrix3;

/// Immutable pinhole intrinsics for one frame resolution.
///
/// Construct once per (width, height) and reuse for every frame at that
/// resolution; safe to share read-only across concurrent calls.
#[derive(Debug, Clone)]
pub struct CameraIntrinsics {
    width: u32,
    height: u32,
    k: Matrix3<f64>,
    k_inv: Matrix3<f64>,
}

impl CameraIntrinsics {
    /// Build intrinsics for a frame resolution.
    ///
    /// # Errors
    /// `InvalidInput` for zero dimensions; `NumericalInstability` if the
    /// camera matrix cannot be inverted (cannot occur for valid
    /// construction, but reported rather than propagating NaNs).
    pub fn new(width: u32, height: u32) -> EngineResult<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::invalid_input(format!(
                "Frame dimensions must be positive, got {width}x{height}"
            )));
        }

        let focal_length = width as f64;
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;

        #[rustfmt::skip]
        let k = Matrix3::new(
            focal_length, 0.0,          cx,
            0.0,          focal_length, cy,
            0.0,          0.0,          1.0,
        );

        let k_inv = k.try_inverse().ok_or_else(|| {
            EngineError::numerical_instability("Camera matrix is not invertible")
        })?;

        Ok(Self {
            width,
            height,
            k,
            k_inv,
        })
    }

    /// Frame width these intrinsics were built for.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height these intrinsics were built for.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The intrinsics matrix K.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.k
    }

    /// Planar homography `K * R * K^-1` for a camera rotation.
    pub fn homography(&self, orientation: &Orientation) -> Matrix3<f64> {
        self.k * orientation.matrix() * self.k_inv
    }
}

/// Scale-about-centre matrix implementing a field-of-view adjustment.
///
/// Scales both axes by `fov_factor` and recentres the scaled frame.
///
/// # Errors
/// `InvalidInput` for zero dimensions or a non-positive/non-finite factor.
pub fn fov_scale_matrix(width: u32, height: u32, fov_factor: f64) -> EngineResult<Matrix3<f64>> {
    if width == 0 || height == 0 {
        return Err(EngineError::invalid_input(format!(
            "Frame dimensions must be positive, got {width}x{height}"
        )));
    }

    if !fov_factor.is_finite() || fov_factor <= 0.0 {
        return Err(EngineError::invalid_input(format!(
            "FOV factor must be positive, got {fov_factor}"
        )));
    }

    let w = width as f64;
    let h = height as f64;

    #[rustfmt::skip]
    let matrix = Matrix3::new(
        fov_factor, 0.0,        w * (1.0 - fov_factor) / 2.0,
        0.0,        fov_factor, h * (1.0 - fov_factor) / 2.0,
        0.0,        0.0,        1.0,
    );

    Ok(matrix)
}
