//! Chatbot gateway route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{ChatbotError, Result};
use crate::state::AppState;

/// Body of `POST /api/chatbot`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Parse a raw request body.
    ///
    /// # Errors
    ///
    /// Returns `ChatbotError::InvalidInput` unless the body is a JSON object
    /// whose `message` is absent, null, or a string.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ChatbotError::InvalidInput(format!("body is not JSON: {e}")))?;
        if !value.is_object() {
            return Err(ChatbotError::InvalidInput(
                "body is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| ChatbotError::InvalidInput(format!("message is not a string: {e}")))
    }

    /// The trimmed message, if it has any text.
    ///
    /// # Errors
    ///
    /// Returns `ChatbotError::InvalidInput` if the message is missing or blank.
    pub fn text(&self) -> Result<&str> {
        let text = self
            .message
            .as_deref()
            .ok_or_else(|| ChatbotError::InvalidInput("message is missing".to_string()))?
            .trim_matches(is_blank);
        if text.is_empty() {
            return Err(ChatbotError::InvalidInput("message is empty".to_string()));
        }
        Ok(text)
    }
}

/// Whitespace, plus the byte order mark clients sometimes leave in pasted text.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Successful reply body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Liveness report body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessReport {
    pub status: &'static str,
    pub timestamp: String,
    pub service_initialized: bool,
}

/// Answer one chatbot message.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>> {
    tracing::info!("Chatbot request received");

    let request = ChatRequest::from_body(&body).inspect_err(|e| {
        tracing::warn!(error = %e, "Chatbot request rejected");
    })?;
    let text = request.text().inspect_err(|e| {
        tracing::warn!(error = %e, "Chatbot request rejected");
    })?;
    tracing::debug!(message_len = text.len(), "Chatbot request validated");

    tracing::info!("Calling chatbot backend");
    match state.chatbot().process_message(text).await {
        Ok(reply) => {
            tracing::info!(
                reply_len = reply.message.len(),
                has_data = reply.data.is_some(),
                "Chatbot backend replied"
            );
            Ok(Json(ChatResponse {
                success: true,
                message: reply.message,
                data: reply.data,
            }))
        }
        Err(err) => {
            let err = ChatbotError::from(err);
            if matches!(err, ChatbotError::Unauthenticated(_)) {
                tracing::info!(error = %err, "Chatbot caller is not signed in");
            }
            Err(err)
        }
    }
}

/// Report that the chatbot gateway is up.
pub async fn liveness() -> Response {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let report = LivenessReport {
        status: "Chatbot API is running!",
        timestamp: timestamp.clone(),
        service_initialized: true,
    };

    match serde_json::to_value(&report) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Chatbot liveness check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "Chatbot API has issues",
                    "error": e.to_string(),
                    "timestamp": timestamp,
                })),
            )
                .into_response()
        }
    }
}
