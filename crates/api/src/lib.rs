//! ClubHub API library.
//!
//! Hosts the chatbot gateway: a JSON endpoint that validates a chat message,
//! hands it to a [`backend::ConversationalBackend`] and shapes the reply or
//! failure into a stable response body. The production backend is the
//! [`assistant::ClubHubAssistant`], which answers from the club
//! [`catalog::Catalog`] through a hosted language model.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assistant;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gemini;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the application router with request tracing and request IDs.
///
/// Handler panics become the internal error body.
///
/// Sentry layers are left to the binary so tests can run without a client.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
