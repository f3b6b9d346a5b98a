//! Shared data models for the FPV transition backend.
//!
//! This crate provides Serde-serializable types for:
//! - Transition requests and the keyframe sequences they produce
//! - Hardware capability profiles and the derived frame-count cap

pub mod hardware;
pub mod transition;

// Re-export common types
pub use hardware::{HardwareProfile, ProfileError, LOW_VRAM_STEP_CAP, LOW_VRAM_THRESHOLD_MB};
pub use transition::{TransitionIntensity, TransitionKeyframes, TransitionRequest};
