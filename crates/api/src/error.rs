//! Chatbot error responses with Sentry integration.
//!
//! Every failure of `POST /api/chatbot` maps to exactly one [`ChatbotError`],
//! which renders the JSON body clients expect for that outcome.

use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

/// Body text for rejected input.
pub const INVALID_INPUT_MESSAGE: &str = "Message is required and must be a string";
/// Body text shown to signed-out callers.
pub const SIGN_IN_PROMPT: &str = "Please sign in to use the chatbot feature.";
/// Body text shown for any other failure.
pub const APOLOGY_MESSAGE: &str = "Sorry, I'm having trouble. Please try again!";
/// Debug text used when the failure carries none.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Chatbot request failure.
#[derive(Debug, Error)]
pub enum ChatbotError {
    /// Request body had no usable message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend needs a signed-in caller.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// Anything else. `debug` is echoed to the client.
    #[error("Internal error: {debug}")]
    Internal { debug: String },
}

impl From<BackendError> for ChatbotError {
    fn from(err: BackendError) -> Self {
        if err.requires_sign_in() {
            return Self::Unauthenticated(err.to_string());
        }
        Self::Internal {
            debug: err.detail().unwrap_or(UNKNOWN_ERROR).to_string(),
        }
    }
}

impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        if let Self::Internal { debug: detail } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %detail,
                sentry_event_id = %event_id,
                "Chatbot request failed"
            );
        }

        match self {
            Self::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": INVALID_INPUT_MESSAGE })),
            )
                .into_response(),
            Self::Unauthenticated(_) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Authentication required",
                    "message": SIGN_IN_PROMPT,
                })),
            )
                .into_response(),
            Self::Internal { debug } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": APOLOGY_MESSAGE,
                    "debug": debug,
                })),
            )
                .into_response(),
        }
    }
}

/// Render a panic caught at the request boundary as an internal error.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`.
#[allow(clippy::needless_pass_by_value)] // signature fixed by CatchPanicLayer
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let debug = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    ChatbotError::Internal { debug }.into_response()
}

/// Result type alias for `ChatbotError`.
pub type Result<T> = std::result::Result<T, ChatbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ChatbotError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[test]
    fn test_chatbot_error_display() {
        let err = ChatbotError::InvalidInput("empty message".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty message");

        let err = ChatbotError::Internal {
            debug: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: boom");
    }

    #[test]
    fn test_backend_error_classification() {
        let err = ChatbotError::from(BackendError::SignInRequired("log in".to_string()));
        assert!(matches!(err, ChatbotError::Unauthenticated(_)));

        let err = ChatbotError::from(BackendError::Failed(
            "User must be signed in to use the chatbot.".to_string(),
        ));
        assert!(matches!(err, ChatbotError::Unauthenticated(_)));

        let err = ChatbotError::from(BackendError::Failed("quota".to_string()));
        assert!(matches!(err, ChatbotError::Internal { ref debug } if debug == "quota"));

        let err = ChatbotError::from(BackendError::Failed(String::new()));
        assert!(matches!(err, ChatbotError::Internal { ref debug } if debug == UNKNOWN_ERROR));
    }

    #[tokio::test]
    async fn test_invalid_input_body() {
        let (status, body) = body_json(ChatbotError::InvalidInput("x".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": INVALID_INPUT_MESSAGE }));
    }

    #[tokio::test]
    async fn test_unauthenticated_body() {
        let (status, body) = body_json(ChatbotError::Unauthenticated("x".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            json!({
                "error": "Authentication required",
                "message": "Please sign in to use the chatbot feature.",
            })
        );
    }

    #[tokio::test]
    async fn test_panic_response_uses_panic_text() {
        let response = panic_response(Box::new("catalog index out of range"));
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["debug"], "catalog index out of range");

        let response = panic_response(Box::new(42_u8));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["debug"], UNKNOWN_ERROR);
    }

    #[tokio::test]
    async fn test_internal_body_echoes_debug() {
        let (status, body) = body_json(ChatbotError::Internal {
            debug: "model unavailable".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": "Internal server error",
                "message": "Sorry, I'm having trouble. Please try again!",
                "debug": "model unavailable",
            })
        );
    }
}
