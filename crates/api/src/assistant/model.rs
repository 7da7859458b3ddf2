//! Text generation seam used by the assistant.

use async_trait::async_trait;
use thiserror::Error;

/// A text generation failure, carrying the provider's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ModelError(pub String);

impl ModelError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A hosted language model that completes a single prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to `prompt`. An empty string means the model said nothing.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
