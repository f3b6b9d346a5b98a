//! Hardware capability profile.
//!
//! The profile is an explicit value passed into the engine, never a
//! process-wide global, so tests and multi-GPU deployments can exercise
//! several profiles side by side. It is read-only after construction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// VRAM below this threshold triggers the interpolation step cap.
pub const LOW_VRAM_THRESHOLD_MB: u32 = 6000;

/// Maximum interpolation steps allowed on low-VRAM hardware.
pub const LOW_VRAM_STEP_CAP: usize = 30;

/// Errors raised while constructing or loading a hardware profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid hardware profile: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Declared capabilities of the compute device running the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HardwareProfile {
    /// Usable device memory in megabytes.
    pub vram_mb: u32,

    /// Whether a CUDA-capable device is declared for model inference.
    #[serde(default)]
    pub use_cuda: bool,
}

impl Default for HardwareProfile {
    fn default() -> Self {
        // Matches the shipped default config: a 4 GB card without CUDA.
        Self {
            vram_mb: 4096,
            use_cuda: false,
        }
    }
}

/// On-disk config file shape: the profile lives under a `device` key.
#[derive(Debug, Deserialize)]
struct ProfileFile {
    device: HardwareProfile,
}

impl HardwareProfile {
    /// Create a validated profile.
    pub fn new(vram_mb: u32, use_cuda: bool) -> Result<Self, ProfileError> {
        let profile = Self { vram_mb, use_cuda };
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON config file (`{"device": {...}}`).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ProfileFile = serde_json::from_str(&contents)?;
        file.device.validate()?;
        Ok(file.device)
    }

    /// Validate the profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.vram_mb == 0 {
            return Err(ProfileError::Invalid(
                "vram_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum interpolation step count imposed by this profile, if any.
    ///
    /// `None` means the profile imposes no cap.
    pub fn max_step_count(&self) -> Option<usize> {
        if self.vram_mb < LOW_VRAM_THRESHOLD_MB {
            Some(LOW_VRAM_STEP_CAP)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_low_vram_profile_caps_steps() {
        let profile = HardwareProfile::new(4096, false).unwrap();
        assert_eq!(profile.max_step_count(), Some(LOW_VRAM_STEP_CAP));
    }

    #[test]
    fn test_high_vram_profile_has_no_cap() {
        let profile = HardwareProfile::new(8192, true).unwrap();
        assert_eq!(profile.max_step_count(), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let profile = HardwareProfile::new(LOW_VRAM_THRESHOLD_MB, false).unwrap();
        assert_eq!(profile.max_step_count(), None);

        let profile = HardwareProfile::new(LOW_VRAM_THRESHOLD_MB - 1, false).unwrap();
        assert_eq!(profile.max_step_count(), Some(LOW_VRAM_STEP_CAP));
    }

    #[test]
    fn test_zero_vram_rejected() {
        assert!(HardwareProfile::new(0, false).is_err());
    }

    #[test]
    fn test_default_profile() {
        let profile = HardwareProfile::default();
        assert_eq!(profile.vram_mb, 4096);
        assert!(!profile.use_cuda);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"device": {{"vram_mb": 8192, "use_cuda": true}}, "logging": {{"log_level": "info"}}}}"#
        )
        .unwrap();

        let profile = HardwareProfile::from_json_file(file.path()).unwrap();
        assert_eq!(profile.vram_mb, 8192);
        assert!(profile.use_cuda);
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"device": {{"vram_mb": 0}}}}"#).unwrap();

        let result = HardwareProfile::from_json_file(file.path());
        assert!(matches!(result, Err(ProfileError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = HardwareProfile::from_json_file("/nonexistent/profile.json");
        assert!(matches!(result, Err(ProfileError::Io(_))));
    }
}
