//! Hardware-aware frame-count policy.
//!
//! The step count is `round(duration * frame_rate)`, clamped by the
//! hardware profile's cap on low-VRAM devices. The clamp is advisory and
//! logged; callers observe it through the `clamped` flag rather than having
//! frames silently dropped.

use crate::error::{EngineError, EngineResult};
use fpv_models::HardwareProfile;
use tracing::warn;

/// Resolved interpolation step count and whether the cap was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCount {
    /// Number of interpolation steps to produce.
    pub steps: usize,

    /// Whether the hardware cap reduced the requested count.
    pub clamped: bool,
}

/// Resolve the interpolation step count for a transition.
///
/// # Errors
/// `InvalidInput` for a non-finite or negative duration, or a non-positive
/// frame rate.
pub fn resolve_step_count(
    duration_seconds: f64,
    frame_rate: f64,
    profile: &HardwareProfile,
) -> EngineResult<StepCount> {
    if !duration_seconds.is_finite() || duration_seconds < 0.0 {
        return Err(EngineError::invalid_input(format!(
            "Duration must be non-negative, got {duration_seconds}"
        )));
    }

    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(EngineError::invalid_input(format!(
            "Frame rate must be positive, got {frame_rate}"
        )));
    }

    let requested = (duration_seconds * frame_rate).round() as usize;

    if let Some(cap) = profile.max_step_count() {
        if requested > cap {
            warn!(
                "Limiting interpolation steps from {} to {} for {} MB VRAM profile",
                requested, cap, profile.vram_mb
            );
            return Ok(StepCount {
                steps: cap,
                clamped: true,
            });
        }
    }

    Ok(StepCount {
        steps: requested,
        clamped: false,
    })
}
