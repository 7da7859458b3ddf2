//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GEMINI_API_KEY` - Generative Language API key for the assistant model
//!
//! ## Optional
//! - `CLUBHUB_HOST` - Bind address (default: 127.0.0.1)
//! - `CLUBHUB_PORT` - Listen port (default: 3000)
//! - `GEMINI_MODEL` - Model ID (default: gemini-2.5-flash-lite)
//! - `GEMINI_BASE_URL` - API base URL (default: Google's v1beta endpoint)
//! - `GEMINI_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `CHATBOT_TEST_MODE` - Skip the sign-in requirement (default: false)
//! - `CHATBOT_SERVICE_IDENTITY` - Identity the assistant runs as when signed in
//! - `CLUBHUB_CATALOG_PATH` - JSON snapshot of clubs and posts for the assistant
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Hosted model configuration
    pub gemini: GeminiConfig,
    /// Chatbot behavior configuration
    pub chatbot: ChatbotConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Generative Language API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-2.5-flash-lite)
    pub model: String,
    /// API base URL, without a trailing slash
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Chatbot behavior configuration.
#[derive(Debug, Clone, Default)]
pub struct ChatbotConfig {
    /// Let anyone use the chatbot without a signed-in identity
    pub test_mode: bool,
    /// Identity the assistant is signed in as
    pub service_identity: Option<String>,
    /// Catalog snapshot to answer club and post questions from
    pub catalog_path: Option<PathBuf>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CLUBHUB_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLUBHUB_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CLUBHUB_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CLUBHUB_PORT".to_string(), e.to_string()))?;

        let gemini = GeminiConfig::from_env()?;
        let chatbot = ChatbotConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            gemini,
            chatbot,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GeminiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = get_validated_secret("GEMINI_API_KEY")?;
        let model = get_env_or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
        let base_url = parse_base_url(
            &get_env_or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            "GEMINI_BASE_URL",
        )?;
        let timeout_secs = get_env_or_default(
            "GEMINI_TIMEOUT_SECS",
            &DEFAULT_GEMINI_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("GEMINI_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl ChatbotConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let test_mode = get_optional_env("CHATBOT_TEST_MODE")
            .map(|raw| parse_bool(&raw, "CHATBOT_TEST_MODE"))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            test_mode,
            service_identity: get_optional_env("CHATBOT_SERVICE_IDENTITY")
                .filter(|identity| !identity.trim().is_empty()),
            catalog_path: get_optional_env("CLUBHUB_CATALOG_PATH").map(PathBuf::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`, case-insensitive).
fn parse_bool(raw: &str, var_name: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected true or false, got '{other}'"),
        )),
    }
}

/// Parse an API base URL, dropping any trailing slash.
fn parse_base_url(raw: &str, var_name: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API keys have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by the provider."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
