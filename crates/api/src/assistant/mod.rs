//! The ClubHub assistant: the production conversational backend.
//!
//! For each message the assistant:
//!
//! 1. checks that a signed-in identity (or test mode) is present
//! 2. works out what the message is about and searches the [`Catalog`]
//! 3. wraps what it found in the assistant prompt
//! 4. asks the [`LanguageModel`] for a reply
//!
//! The catalog results go back to the client as reply data alongside the
//! model's text.

pub mod context;
pub mod intent;
mod model;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::instrument;

use crate::backend::{BackendError, BackendReply, ConversationalBackend};
use crate::catalog::Catalog;
use crate::config::ChatbotConfig;

pub use model::{LanguageModel, ModelError};

/// Error text for callers without a signed-in identity.
pub const SIGN_IN_REQUIRED: &str = "User must be signed in to use the chatbot. Please log in first.";

/// Reply used when the model returns no text.
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Who may use the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone, with no identity required.
    TestMode,
    /// Signed in as the given identity.
    SignedIn(String),
    /// No identity; every message is refused.
    SignedOut,
}

impl AccessPolicy {
    /// Policy implied by configuration. Test mode wins over an identity.
    #[must_use]
    pub fn from_config(config: &ChatbotConfig) -> Self {
        if config.test_mode {
            Self::TestMode
        } else if let Some(identity) = &config.service_identity {
            Self::SignedIn(identity.clone())
        } else {
            Self::SignedOut
        }
    }

    /// Refuse the request unless the policy allows it.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SignInRequired` when signed out.
    pub fn check(&self) -> Result<(), BackendError> {
        match self {
            Self::TestMode => {
                tracing::debug!("Chatbot running in test mode, sign-in not required");
                Ok(())
            }
            Self::SignedIn(identity) => {
                tracing::debug!(%identity, "Chatbot identity present");
                Ok(())
            }
            Self::SignedOut => Err(BackendError::SignInRequired(SIGN_IN_REQUIRED.to_string())),
        }
    }
}

/// Answers questions about ClubHub clubs, posts and events.
#[derive(Clone)]
pub struct ClubHubAssistant {
    model: Arc<dyn LanguageModel>,
    catalog: Arc<Catalog>,
    access: AccessPolicy,
}

impl ClubHubAssistant {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>, catalog: Arc<Catalog>, access: AccessPolicy) -> Self {
        Self {
            model,
            catalog,
            access,
        }
    }

    /// Answer a message as of `now`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SignInRequired` if the access policy refuses the
    /// request, or `BackendError::Failed` with the model's error text if
    /// generation fails.
    #[instrument(skip(self, text), fields(message_len = text.len()))]
    pub async fn answer_at(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<BackendReply, BackendError> {
        self.access.check()?;

        let gathered = context::gather(&self.catalog, text, now);
        let prompt = prompt::build(text, &gathered.text);

        let reply = self.model.generate(&prompt).await.map_err(|e| {
            tracing::warn!(error = %e, "Language model failed");
            BackendError::failed(e)
        })?;

        let message = if reply.trim().is_empty() {
            EMPTY_REPLY.to_string()
        } else {
            reply
        };

        Ok(BackendReply::with_data(message, Value::Object(gathered.data)))
    }
}

#[async_trait]
impl ConversationalBackend for ClubHubAssistant {
    async fn process_message(&self, text: &str) -> Result<BackendReply, BackendError> {
        self.answer_at(text, Utc::now()).await
    }
}
