//! Perspective frame warping.
//!
//! A warp resamples the input raster into a freshly allocated output of the
//! same dimensions. Each output pixel is backward-mapped through the
//! inverse of the forward homography and bilinearly sampled; source
//! coordinates outside the input are filled transparent black (fixed border
//! policy). The input frame is never mutated.

use crate::camera::{fov_scale_matrix, CameraIntrinsics};
use crate::error::{EngineError, EngineResult};
use crate::rotation::Orientation;
use image::{Rgba, RgbaImage};
use nalgebra::{Matrix3, Vector3};

/// Homogeneous coordinates closer to zero than this are treated as points
/// at infinity and left on the border fill.
const HOMOGENEOUS_EPSILON: f64 = 1e-12;

/// Applies camera rotations and FOV adjustments to raster frames.
#[derive(Debug, Clone)]
pub struct FrameWarper {
    intrinsics: CameraIntrinsics,
}

impl FrameWarper {
    /// Create a warper around existing intrinsics.
    pub fn new(intrinsics: CameraIntrinsics) -> Self {
        Self { intrinsics }
    }

    /// Create a warper sized for a specific frame.
    pub fn for_frame(frame: &RgbaImage) -> EngineResult<Self> {
        CameraIntrinsics::new(frame.width(), frame.height()).map(Self::new)
    }

    /// The intrinsics this warper resamples with.
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Warp a frame as if the camera performed the given rotation.
    pub fn warp_rotation(
        &self,
        frame: &RgbaImage,
        orientation: &Orientation,
    ) -> EngineResult<RgbaImage> {
        self.check_frame(frame)?;
        let homography = self.intrinsics.homography(orientation);
        warp_perspective(frame, &homography)
    }

    /// Warp a frame through a field-of-view adjustment.
    pub fn warp_fov(&self, frame: &RgbaImage, fov_factor: f64) -> EngineResult<RgbaImage> {
        self.check_frame(frame)?;
        let scale = fov_scale_matrix(frame.width(), frame.height(), fov_factor)?;
        warp_perspective(frame, &scale)
    }

    fn check_frame(&self, frame: &RgbaImage) -> EngineResult<()> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(EngineError::invalid_input("Frame has zero area"));
        }

        if frame.width() != self.intrinsics.width() || frame.height() != self.intrinsics.height() {
            return Err(EngineError::invalid_input(format!(
                "Frame is {}x{} but intrinsics were built for {}x{}",
                frame.width(),
                frame.height(),
                self.intrinsics.width(),
                self.intrinsics.height()
            )));
        }

        Ok(())
    }
}

/// Resample `frame` through `forward`, backward-mapping each output pixel.
fn warp_perspective(frame: &RgbaImage, forward: &Matrix3<f64>) -> EngineResult<RgbaImage> {
    let inverse = forward
        .try_inverse()
        .ok_or_else(|| EngineError::numerical_instability("Homography is not invertible"))?;

    let (width, height) = frame.dimensions();
    // Zero-initialized means the border fill is already in place.
    let mut output = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let source = inverse * Vector3::new(x as f64, y as f64, 1.0);
            if source.z.abs() < HOMOGENEOUS_EPSILON {
                continue;
            }

            let sx = source.x / source.z;
            let sy = source.y / source.z;

            if let Some(pixel) = sample_bilinear(frame, sx, sy) {
                output.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(output)
}

/// Bilinear sample at a fractional source coordinate.
///
/// Returns `None` outside the frame, leaving the border fill untouched.
fn sample_bilinear(frame: &RgbaImage, sx: f64, sy: f64) -> Option<Rgba<u8>> {
    if !sx.is_finite() || !sy.is_finite() {
        return None;
    }

    let (width, height) = frame.dimensions();
    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;

    if sx < 0.0 || sy < 0.0 || sx > max_x || sy > max_y {
        return None;
    }

    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let p00 = frame.get_pixel(x0, y0);
    let p10 = frame.get_pixel(x1, y0);
    let p01 = frame.get_pixel(x0, y1);
    let p11 = frame.get_pixel(x1, y1);

    let mut channels = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        channels[c] = (top * (1.0 - fy) + bottom * fy).round() as u8;
    }

    Some(Rgba(channels))
}
