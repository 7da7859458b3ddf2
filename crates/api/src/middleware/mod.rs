//! HTTP middleware for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per request)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (tag span, Sentry scope and response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
