//! Boundary operations exposed to the request-handling layer.
//!
//! Both operations are pure given their inputs and return typed errors;
//! malformed parameters never panic.

use crate::error::{EngineError, EngineResult};
use crate::policy::resolve_step_count;
use crate::rotation::Orientation;
use crate::trajectory::interpolate_poses;
use crate::warp::FrameWarper;
use fpv_models::{HardwareProfile, TransitionKeyframes, TransitionRequest};
use image::RgbaImage;
use tracing::info;

/// Create the keyframe sequence for a transition between two clips.
///
/// Resolves the step count against the hardware profile, interpolates
/// orientations between the endpoints, and converts each back to the angle
/// triplet format of the caller's animation layer.
pub fn create_transition(
    request: &TransitionRequest,
    profile: &HardwareProfile,
) -> EngineResult<TransitionKeyframes> {
    request.validate().map_err(EngineError::invalid_input)?;

    let start = Orientation::from_angles_deg(request.start_rotation)?;
    let end = Orientation::from_angles_deg(request.end_rotation)?;

    info!(
        "Creating transition: {:?} -> {:?}, duration {}s, intensity {}",
        request.start_rotation,
        request.end_rotation,
        request.duration_seconds,
        request.intensity.description()
    );

    let count = resolve_step_count(request.duration_seconds, request.frame_rate, profile)?;
    let poses = interpolate_poses(&start, &end, count.steps);

    Ok(TransitionKeyframes {
        frames: count.steps,
        clamped: count.clamped,
        keyframes: poses.iter().map(Orientation::to_angles_deg).collect(),
    })
}

/// Apply a rotation and FOV adjustment to a single frame.
///
/// Used for interactive preview: builds intrinsics for the frame's
/// resolution, warps through the rotation homography, then applies the FOV
/// scale (in that order, matching the keyframe renderer).
pub fn transform_frame(
    frame: &RgbaImage,
    angles_deg: [f64; 3],
    fov_factor: f64,
) -> EngineResult<RgbaImage> {
    let orientation = Orientation::from_angles_deg(angles_deg)?;
    let warper = FrameWarper::for_frame(frame)?;

    let rotated = warper.warp_rotation(frame, &orientation)?;
    warper.warp_fov(&rotated, fov_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn angles_close(a: [f64; 3], b: [f64; 3], tolerance: f64) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < tolerance)
    }

    #[test]
    fn test_transition_hits_endpoints() {
        let request = TransitionRequest::new([0.0, 0.0, 0.0], [20.0, -10.0, 5.0], 1.0);
        let profile = HardwareProfile::new(8192, false).unwrap();

        let result = create_transition(&request, &profile).unwrap();
        assert_eq!(result.frames, 30);
        assert!(!result.clamped);
        assert_eq!(result.keyframes.len(), 30);
        assert!(angles_close(result.keyframes[0], [0.0, 0.0, 0.0], 1e-6));
        assert!(angles_close(result.keyframes[29], [20.0, -10.0, 5.0], 1e-3));
    }

    #[test]
    fn test_transition_clamps_on_low_vram() {
        let request = TransitionRequest::new([0.0; 3], [45.0, 0.0, 0.0], 2.0);
        let profile = HardwareProfile::new(4096, false).unwrap();

        let result = create_transition(&request, &profile).unwrap();
        assert_eq!(result.frames, 30);
        assert!(result.clamped);
        assert!(angles_close(*result.keyframes.last().unwrap(), [45.0, 0.0, 0.0], 1e-3));
    }

    #[test]
    fn test_transition_rejects_invalid_request() {
        let mut request = TransitionRequest::new([0.0; 3], [10.0, 0.0, 0.0], 1.0);
        request.duration_seconds = f64::NAN;

        let profile = HardwareProfile::default();
        let result = create_transition(&request, &profile);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_transform_frame_identity() {
        let frame = RgbaImage::from_pixel(32, 32, Rgba([120, 80, 40, 255]));
        let result = transform_frame(&frame, [0.0, 0.0, 0.0], 1.0).unwrap();

        for (a, b) in frame.pixels().zip(result.pixels()) {
            for c in 0..4 {
                assert!((a[c] as i16 - b[c] as i16).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_transform_frame_rejects_bad_fov() {
        let frame = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        assert!(transform_frame(&frame, [0.0; 3], 0.0).is_err());
    }

    #[test]
    fn test_transform_frame_rejects_empty_frame() {
        let frame = RgbaImage::new(0, 0);
        assert!(transform_frame(&frame, [0.0; 3], 1.0).is_err());
    }
}
