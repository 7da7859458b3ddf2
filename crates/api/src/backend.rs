//! The conversational backend seam.
//!
//! The gateway does not know how replies are produced. It talks to a
//! [`ConversationalBackend`] injected at startup, which turns a trimmed user
//! message into a [`BackendReply`] or fails with a [`BackendError`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Marker text backends use to report a missing sign-in.
///
/// Errors that do not carry [`BackendError::SignInRequired`] are still
/// classified as sign-in failures when their text contains this phrase.
pub const SIGN_IN_MARKER: &str = "must be signed in";

/// Reply produced by a backend for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    /// Reply text shown to the user.
    pub message: String,
    /// Structured context gathered while answering, if any.
    pub data: Option<Value>,
}

impl BackendReply {
    /// Reply with text only.
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Reply with text and structured data.
    #[must_use]
    pub fn with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Errors a backend can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The caller has no signed-in identity.
    #[error("{0}")]
    SignInRequired(String),

    /// Any other failure, with its human-readable text.
    #[error("{0}")]
    Failed(String),
}

impl BackendError {
    /// Build a generic failure from any displayable error.
    #[must_use]
    pub fn failed(err: impl std::fmt::Display) -> Self {
        Self::Failed(err.to_string())
    }

    /// Whether this failure means the caller has to sign in.
    ///
    /// The structured kind wins; failures without it fall back to looking for
    /// [`SIGN_IN_MARKER`] in their text.
    #[must_use]
    pub fn requires_sign_in(&self) -> bool {
        match self {
            Self::SignInRequired(_) => true,
            Self::Failed(text) => text.contains(SIGN_IN_MARKER),
        }
    }

    /// The failure's text, or `None` when the backend gave none.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        let text = match self {
            Self::SignInRequired(text) | Self::Failed(text) => text.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// A service that answers chatbot messages.
#[async_trait]
pub trait ConversationalBackend: Send + Sync {
    /// Answer one already-trimmed, non-empty message.
    async fn process_message(&self, text: &str) -> Result<BackendReply, BackendError>;
}
