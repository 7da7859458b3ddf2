//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini API returned an error.
    #[error("API error ({status}): {message}")]
    Api {
        /// Status name from the API (e.g., `INVALID_ARGUMENT`).
        status: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The prompt or the reply was blocked by safety filters.
    #[error("blocked by safety filters: {0}")]
    Blocked(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Client could not be built from configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Error envelope returned by Google APIs.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// HTTP status code.
    #[serde(default)]
    pub code: u16,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name.
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_display() {
        let err = GeminiError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");

        let err = GeminiError::Api {
            status: "INVALID_ARGUMENT".to_string(),
            message: "Request contains an invalid argument.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (INVALID_ARGUMENT): Request contains an invalid argument."
        );

        let err = GeminiError::Blocked("SAFETY".to_string());
        assert_eq!(err.to_string(), "blocked by safety filters: SAFETY");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        let response: ApiErrorResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.error.code, 400);
        assert_eq!(response.error.status, "INVALID_ARGUMENT");
        assert_eq!(
            response.error.message,
            "API key not valid. Please pass a valid API key."
        );
    }
}
