//! Gemini integration for the ClubHub assistant.
//!
//! Talks to the Generative Language API `generateContent` endpoint with a
//! single user turn per request. Replies are plain text; the assistant builds
//! all context into the prompt itself.
//!
//! ```rust,ignore
//! let client = GeminiClient::new(&config.gemini)?;
//! let reply = client.generate_text("Which clubs run hackathons?").await?;
//! ```

mod client;
mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::{ApiError, ApiErrorResponse, GeminiError};
