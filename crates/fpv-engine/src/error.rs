//! Error types for engine operations.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the transition engine.
///
/// Every operation validates its inputs eagerly and fails with a specific
/// kind before doing numerical work; no operation retries internally.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl EngineError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a resource-unavailable error.
    pub fn resource_unavailable(message: impl Into<String>) -> Self {
        Self::ResourceUnavailable(message.into())
    }

    /// Create a numerical-instability error.
    pub fn numerical_instability(message: impl Into<String>) -> Self {
        Self::NumericalInstability(message.into())
    }
}
