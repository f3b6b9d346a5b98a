//! 3D camera-motion transition engine.
//!
//! This crate provides:
//! - Camera orientation representation with Rodrigues conversions
//! - Pinhole intrinsics and planar rotation homographies
//! - Trajectory interpolation between camera poses (plus Bezier paths)
//! - Perspective frame warping with a fixed transparent border policy
//! - A hardware-aware frame-count policy with an advisory clamp
//! - Pluggable in-between frame synthesis with a linear-blend fallback
//!
//! Every operation is a pure function of its inputs plus read-only
//! [`CameraIntrinsics`]/[`fpv_models::HardwareProfile`] context, so
//! concurrent transition requests share nothing mutable.

pub mod camera;
pub mod error;
pub mod policy;
pub mod rotation;
pub mod synth;
pub mod trajectory;
pub mod transition;
pub mod warp;

// Re-export common types
pub use camera::{fov_scale_matrix, CameraIntrinsics};
pub use error::{EngineError, EngineResult};
pub use policy::{resolve_step_count, StepCount};
pub use rotation::{interpolate_rotation_vectors, Orientation};
pub use synth::{
    resolve_interpolator, DenseMotion, FrameInterpolator, LinearBlend, SynthesisConfig,
};
pub use trajectory::{
    interpolate_path, interpolate_poses, sample_trajectory, sample_trajectory_with_path,
    TrajectorySample,
};
pub use transition::{create_transition, transform_frame};
pub use warp::FrameWarper;
