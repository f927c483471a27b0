//! Retry a failed generation once on a second model

use async_trait::async_trait;
use scout_application::{GenerationError, TextGenerator};
use std::sync::Arc;
use tracing::warn;

/// Wraps a primary generator with a fallback model.
///
/// Only quota and availability failures switch to the fallback, and only
/// once per call.
pub struct FallbackTextGenerator {
    primary: Arc<dyn TextGenerator>,
    fallback: Arc<dyn TextGenerator>,
}

impl FallbackTextGenerator {
    pub fn new(primary: Arc<dyn TextGenerator>, fallback: Arc<dyn TextGenerator>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl TextGenerator for FallbackTextGenerator {
    fn model_name(&self) -> &str {
        self.primary.model_name()
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, GenerationError> {
        match self.primary.generate(prompt, system_instruction).await {
            Err(e) if e.is_transient() => {
                warn!(
                    primary = self.primary.model_name(),
                    fallback = self.fallback.model_name(),
                    error = %e,
                    "Generation failed, retrying on fallback model"
                );
                self.fallback.generate(prompt, system_instruction).await
            }
            outcome => outcome,
        }
    }
}
