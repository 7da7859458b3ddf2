//! Gemini API client for text generation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::assistant::{LanguageModel, ModelError};
use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
const SAFETY_FINISH_REASON: &str = "SAFETY";

/// Gemini API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Config` if the API key is not a valid header
    /// value, or `GeminiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::Config("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                model: config.model.clone(),
                endpoint: endpoint_url(config.base_url.as_str(), &config.model),
            }),
        })
    }

    /// Model ID requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Generate a reply to a single user prompt.
    ///
    /// Returns the concatenated text of the first candidate, or an empty
    /// string if the model produced none.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error
    /// response, or the prompt is blocked.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model, prompt_len = prompt.len()))]
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                temperature: None,
                max_output_tokens: Some(DEFAULT_MAX_OUTPUT_TOKENS),
            }),
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let body = self.handle_response(response).await?;

        if let Some(reason) = body.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        if let Some(usage) = &body.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                reply_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        let text = body.text().unwrap_or_default();
        let safety_stop = body
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
            == Some(SAFETY_FINISH_REASON);
        if text.is_empty() && safety_stop {
            return Err(GeminiError::Blocked(SAFETY_FINISH_REASON.to_string()));
        }

        Ok(text)
    }

    /// Parse a successful response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GeminiError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return GeminiError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!(model = %self.inner.model, %status, "Gemini rejected credentials");
            return GeminiError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    GeminiError::Api {
                        status: api_error.error.status,
                        message: api_error.error.message,
                    }
                } else {
                    GeminiError::Api {
                        status: status.to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => GeminiError::Http(e),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.generate_text(prompt)
            .await
            .map_err(|e| ModelError::new(e.to_string()))
    }
}

/// Build the `generateContent` URL for a model.
fn endpoint_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{model}:generateContent",
        base_url.trim_end_matches('/')
    )
}
