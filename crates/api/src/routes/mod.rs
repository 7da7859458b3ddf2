//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health       - Health check
//!
//! # Chatbot gateway
//! POST /api/chatbot  - Answer a message
//! GET  /api/chatbot  - Liveness report
//! ```

pub mod chatbot;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the chatbot gateway routes.
pub fn chatbot_routes() -> Router<AppState> {
    Router::new().route("/", get(chatbot::liveness).post(chatbot::chat))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/chatbot", chatbot_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
