//! In-between frame synthesis.
//!
//! Defines the `FrameInterpolator` capability: given two already-warped
//! frames, produce `count` frames strictly between them in time. A linear
//! pixel blend is always available; an external dense-motion model plugs in
//! behind the same contract and is selected at configuration time, falling
//! back to the blend when the model or device is unavailable.

use crate::error::{EngineError, EngineResult};
use fpv_models::HardwareProfile;
use image::{GrayImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Strategy for synthesizing in-between frames.
///
/// Implementations must return exactly `count` frames with the input
/// dimensions, ordered so frame `i` is perceptually closer to `a` for small
/// `i` and to `b` for large `i`.
pub trait FrameInterpolator: Send + Sync {
    /// Synthesize `count` frames strictly between `a` and `b` in time.
    fn synthesize(
        &self,
        a: &RgbaImage,
        b: &RgbaImage,
        count: usize,
    ) -> EngineResult<Vec<RgbaImage>>;

    /// Mask-aware variant for callers that track regions of significant
    /// motion. Implementations without mask support ignore the mask.
    fn synthesize_with_mask(
        &self,
        a: &RgbaImage,
        b: &RgbaImage,
        _mask: &GrayImage,
        count: usize,
    ) -> EngineResult<Vec<RgbaImage>> {
        self.synthesize(a, b, count)
    }
}

/// Check the two endpoint frames agree in shape and are non-empty.
fn check_pair(a: &RgbaImage, b: &RgbaImage) -> EngineResult<()> {
    if a.width() == 0 || a.height() == 0 {
        return Err(EngineError::invalid_input("Frame has zero area"));
    }

    if a.dimensions() != b.dimensions() {
        return Err(EngineError::invalid_input(format!(
            "Frame dimensions differ: {}x{} vs {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        )));
    }

    Ok(())
}

/// Alpha-weighted pixel average of two frames.
fn blend(a: &RgbaImage, b: &RgbaImage, alpha: f64) -> RgbaImage {
    RgbaImage::from_fn(a.width(), a.height(), |x, y| {
        let pa = a.get_pixel(x, y);
        let pb = b.get_pixel(x, y);
        let mut channels = [0u8; 4];
        for c in 0..4 {
            channels[c] = (pa[c] as f64 * (1.0 - alpha) + pb[c] as f64 * alpha).round() as u8;
        }
        Rgba(channels)
    })
}

/// Always-available linear-blend synthesizer.
///
/// Frame `i` (1-based) uses `alpha = i / (count + 1)`, so a single
/// in-between frame is the 50/50 blend.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearBlend;

impl FrameInterpolator for LinearBlend {
    fn synthesize(
        &self,
        a: &RgbaImage,
        b: &RgbaImage,
        count: usize,
    ) -> EngineResult<Vec<RgbaImage>> {
        check_pair(a, b)?;

        Ok((1..=count)
            .map(|i| {
                let alpha = i as f64 / (count + 1) as f64;
                blend(a, b, alpha)
            })
            .collect())
    }
}

/// External dense-motion interpolation model.
///
/// Only the loading and invocation contract lives in the engine; the model
/// weights and inference runtime ship with the deployment. Loading fails
/// with `ResourceUnavailable` when the weights are missing, which
/// [`resolve_interpolator`] handles by falling back to [`LinearBlend`].
pub struct DenseMotion {
    model_path: PathBuf,
}

impl DenseMotion {
    /// Load the dense-motion model from its weights file.
    ///
    /// # Errors
    /// `ResourceUnavailable` if the weights file does not exist.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EngineError::resource_unavailable(format!(
                "Dense-motion model not found at {}",
                path.display()
            )));
        }

        Ok(Self {
            model_path: path.to_path_buf(),
        })
    }

    /// Path the model was loaded from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl FrameInterpolator for DenseMotion {
    fn synthesize(
        &self,
        a: &RgbaImage,
        b: &RgbaImage,
        count: usize,
    ) -> EngineResult<Vec<RgbaImage>> {
        // TODO: dispatch to the dense-motion inference session once the
        // runtime integration lands; until then the loaded model produces
        // the same blend as the fallback.
        LinearBlend.synthesize(a, b, count)
    }
}

/// Configuration for frame-synthesis strategy selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Path to the dense-motion model weights; `None` selects linear blend.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

/// Select a frame interpolator for the given configuration and hardware.
///
/// Prefers the dense-motion model when one is configured and the profile
/// declares a CUDA device; any unavailability is logged and falls back to
/// the linear blend rather than failing the transition.
pub fn resolve_interpolator(
    config: &SynthesisConfig,
    profile: &HardwareProfile,
) -> Box<dyn FrameInterpolator> {
    let Some(path) = &config.model_path else {
        return Box::new(LinearBlend);
    };

    if !profile.use_cuda {
        warn!("CUDA not declared in hardware profile, falling back to linear blend");
        return Box::new(LinearBlend);
    }

    match DenseMotion::load(path) {
        Ok(model) => Box::new(model),
        Err(e) => {
            warn!("Dense-motion model unavailable: {}, falling back to linear blend", e);
            Box::new(LinearBlend)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_single_frame_is_even_blend() {
        let a = solid_frame(8, 8, 0);
        let b = solid_frame(8, 8, 200);

        let frames = LinearBlend.synthesize(&a, &b, 1).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get_pixel(4, 4)[0], 100);
    }

    #[test]
    fn test_blend_ordering_is_monotonic() {
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 255);

        let frames = LinearBlend.synthesize(&a, &b, 5).unwrap();
        assert_eq!(frames.len(), 5);

        let values: Vec<u8> = frames.iter().map(|f| f.get_pixel(0, 0)[0]).collect();
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1], "blend values must increase toward b");
        }
        // Strictly between the endpoints.
        assert!(values[0] > 0);
        assert!(*values.last().unwrap() < 255);
    }

    #[test]
    fn test_output_dimensions_match_inputs() {
        let a = solid_frame(16, 9, 10);
        let b = solid_frame(16, 9, 20);

        for frame in LinearBlend.synthesize(&a, &b, 3).unwrap() {
            assert_eq!(frame.dimensions(), (16, 9));
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 255);
        assert!(LinearBlend.synthesize(&a, &b, 0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_mismatched_dimensions() {
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(8, 8, 255);
        assert!(LinearBlend.synthesize(&a, &b, 1).is_err());
    }

    #[test]
    fn test_mask_variant_defaults_to_plain_synthesis() {
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 100);
        let mask = GrayImage::new(4, 4);

        let frames = LinearBlend.synthesize_with_mask(&a, &b, &mask, 1).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get_pixel(0, 0)[0], 50);
    }

    #[test]
    fn test_dense_motion_load_missing_weights() {
        let result = DenseMotion::load("/nonexistent/model.onnx");
        assert!(matches!(result, Err(EngineError::ResourceUnavailable(_))));
    }

    #[test]
    fn test_dense_motion_load_and_synthesize() {
        let weights = tempfile::NamedTempFile::new().unwrap();
        let model = DenseMotion::load(weights.path()).unwrap();
        assert_eq!(model.model_path(), weights.path());

        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 100);
        let frames = model.synthesize(&a, &b, 2).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_resolver_defaults_to_linear_blend() {
        let profile = HardwareProfile::new(8192, true).unwrap();
        let interpolator = resolve_interpolator(&SynthesisConfig::default(), &profile);

        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 200);
        let frames = interpolator.synthesize(&a, &b, 1).unwrap();
        assert_eq!(frames[0].get_pixel(0, 0)[0], 100);
    }

    #[test]
    fn test_resolver_falls_back_without_cuda() {
        let profile = HardwareProfile::new(8192, false).unwrap();
        let config = SynthesisConfig {
            model_path: Some(PathBuf::from("/models/dense_motion.onnx")),
        };

        let interpolator = resolve_interpolator(&config, &profile);
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 200);
        assert_eq!(interpolator.synthesize(&a, &b, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_resolver_falls_back_on_missing_weights() {
        let profile = HardwareProfile::new(8192, true).unwrap();
        let config = SynthesisConfig {
            model_path: Some(PathBuf::from("/nonexistent/model.onnx")),
        };

        // Must not fail; unavailability degrades to the blend.
        let interpolator = resolve_interpolator(&config, &profile);
        let a = solid_frame(4, 4, 0);
        let b = solid_frame(4, 4, 200);
        assert_eq!(interpolator.synthesize(&a, &b, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_resolver_loads_existing_model() {
        let weights = tempfile::NamedTempFile::new().unwrap();
        let profile = HardwareProfile::new(8192, true).unwrap();
        let config = SynthesisConfig {
            model_path: Some(weights.path().to_path_buf()),
        };

        let interpolator = resolve_interpolator(&config, &profile);
        let a = solid_frame(4, 4, 40);
        let b = solid_frame(4, 4, 60);
        assert_eq!(interpolator.synthesize(&a, &b, 1).unwrap().len(), 1);
    }
}
