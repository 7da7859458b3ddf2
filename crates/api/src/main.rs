//! ClubHub API server.
//!
//! Serves the chatbot gateway on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Gemini API for the assistant's replies
//! - In-memory club catalog loaded from a JSON snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clubhub_api::assistant::{AccessPolicy, ClubHubAssistant};
use clubhub_api::backend::ConversationalBackend;
use clubhub_api::catalog::Catalog;
use clubhub_api::config::ApiConfig;
use clubhub_api::gemini::GeminiClient;
use clubhub_api::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            send_default_pii: false,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clubhub_api=info,tower_http=debug".into());

    // JSON logs on Fly.io, text locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let catalog = match &config.chatbot.catalog_path {
        Some(path) => Catalog::from_path(path).expect("Failed to load club catalog"),
        None => {
            tracing::warn!("CLUBHUB_CATALOG_PATH not set, starting with an empty catalog");
            Catalog::empty()
        }
    };
    tracing::info!(
        clubs = catalog.club_count(),
        posts = catalog.post_count(),
        "Club catalog loaded"
    );

    let model = GeminiClient::new(&config.gemini).expect("Failed to create Gemini client");
    tracing::info!(model = model.model(), "Gemini client ready");

    let access = AccessPolicy::from_config(&config.chatbot);
    if access == AccessPolicy::SignedOut {
        tracing::warn!("No chatbot identity configured, every chat message will require sign-in");
    }

    let assistant: Arc<dyn ConversationalBackend> = Arc::new(ClubHubAssistant::new(
        Arc::new(model),
        Arc::new(catalog),
        access,
    ));
    let state = AppState::new(assistant);

    let app = clubhub_api::app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("clubhub-api listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
