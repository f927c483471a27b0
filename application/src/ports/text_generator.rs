//! Text generation port
//!
//! Defines the interface the use cases use to ask a language model for text.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Quota exhausted: {0}")]
    Quota(String),

    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Quota and availability failures may succeed on another model.
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Quota(_) | GenerationError::Unavailable(_))
    }
}

/// Text-generation capability
///
/// Implementations (adapters) live in the infrastructure layer. Timeouts are
/// the adapter's responsibility.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name of the model answering requests
    fn model_name(&self) -> &str;

    /// Generate text for `prompt`, optionally steered by a system instruction
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, GenerationError>;
}
