//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::ConversationalBackend;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The chatbot backend is built once at startup
/// and is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    chatbot: Arc<dyn ConversationalBackend>,
}

impl AppState {
    /// Create a new application state around a chatbot backend.
    #[must_use]
    pub fn new(chatbot: Arc<dyn ConversationalBackend>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { chatbot }),
        }
    }

    /// Get the chatbot backend.
    #[must_use]
    pub fn chatbot(&self) -> &dyn ConversationalBackend {
        self.inner.chatbot.as_ref()
    }
}
