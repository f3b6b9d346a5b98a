//! Transition request and keyframe result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative intensity hint attached to a transition request.
///
/// Carried through to the host panel's presets; the engine core does not
/// use it numerically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransitionIntensity {
    /// Subtle motion, suited to dialogue cuts.
    Low,

    /// Balanced motion for general-purpose transitions.
    #[default]
    Medium,

    /// Aggressive motion for action sequences.
    High,
}

impl TransitionIntensity {
    /// Human-readable description of the intensity level.
    pub fn description(&self) -> &'static str {
        match self {
            TransitionIntensity::Low => "low (subtle motion)",
            TransitionIntensity::Medium => "medium (balanced motion)",
            TransitionIntensity::High => "high (aggressive motion)",
        }
    }
}

/// Parameters for one camera-motion transition between two clips.
///
/// Rotation triplets are `[rx, ry, rz]` in degrees, interpreted by the
/// engine as a combined axis-angle rotation vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionRequest {
    /// Camera rotation at the end of the outgoing clip.
    #[serde(default)]
    pub start_rotation: [f64; 3],

    /// Camera rotation at the start of the incoming clip.
    #[serde(default)]
    pub end_rotation: [f64; 3],

    /// Transition duration in seconds.
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,

    /// Output frame rate used to derive the interpolation step count.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,

    /// Qualitative intensity hint (passed through, not used numerically).
    #[serde(default)]
    pub intensity: TransitionIntensity,
}

fn default_duration() -> f64 {
    1.0
}

fn default_frame_rate() -> f64 {
    30.0
}

impl TransitionRequest {
    /// Create a request with default frame rate and intensity.
    pub fn new(start_rotation: [f64; 3], end_rotation: [f64; 3], duration_seconds: f64) -> Self {
        Self {
            start_rotation,
            end_rotation,
            duration_seconds,
            frame_rate: default_frame_rate(),
            intensity: TransitionIntensity::default(),
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_rotation.iter().any(|a| !a.is_finite()) {
            return Err(format!(
                "Start rotation must be finite, got {:?}",
                self.start_rotation
            ));
        }

        if self.end_rotation.iter().any(|a| !a.is_finite()) {
            return Err(format!(
                "End rotation must be finite, got {:?}",
                self.end_rotation
            ));
        }

        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(format!(
                "Duration must be positive, got {}",
                self.duration_seconds
            ));
        }

        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(format!("Frame rate must be positive, got {}", self.frame_rate));
        }

        Ok(())
    }
}

/// Result of a transition request: one keyframe angle triplet per
/// interpolation step, in temporal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransitionKeyframes {
    /// Number of interpolation steps actually produced.
    pub frames: usize,

    /// Whether the step count was clamped by the hardware profile.
    pub clamped: bool,

    /// Interpolated `[rx, ry, rz]` triplets in degrees, temporal order.
    pub keyframes: Vec<[f64; 3]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let request: TransitionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.start_rotation, [0.0, 0.0, 0.0]);
        assert_eq!(request.end_rotation, [0.0, 0.0, 0.0]);
        assert!((request.duration_seconds - 1.0).abs() < 1e-9);
        assert!((request.frame_rate - 30.0).abs() < 1e-9);
        assert_eq!(request.intensity, TransitionIntensity::Medium);
    }

    #[test]
    fn test_intensity_serde_lowercase() {
        let json = serde_json::to_string(&TransitionIntensity::High).unwrap();
        assert_eq!(json, "\"high\"");
        let parsed: TransitionIntensity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, TransitionIntensity::Low);
    }

    #[test]
    fn test_valid_request() {
        let request = TransitionRequest::new([0.0, 0.0, 0.0], [10.0, -20.0, 5.0], 1.5);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite_rotation() {
        let mut request = TransitionRequest::new([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], 1.0);
        request.start_rotation[1] = f64::NAN;
        assert!(request.validate().is_err());

        let mut request = TransitionRequest::new([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], 1.0);
        request.end_rotation[2] = f64::INFINITY;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_duration_and_rate() {
        let mut request = TransitionRequest::new([0.0; 3], [0.0; 3], 0.0);
        assert!(request.validate().is_err());

        request.duration_seconds = 1.0;
        request.frame_rate = -30.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_keyframes_roundtrip() {
        let keyframes = TransitionKeyframes {
            frames: 2,
            clamped: false,
            keyframes: vec![[0.0, 0.0, 0.0], [10.0, 20.0, 30.0]],
        };
        let json = serde_json::to_string(&keyframes).unwrap();
        let parsed: TransitionKeyframes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, keyframes);
    }
}
