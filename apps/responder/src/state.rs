use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm_client::CompletionProvider;
use crate::render::PageRenderer;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single form/result state. Never locked across a completion call.
    pub session: Arc<Mutex<Session>>,
    /// Pluggable completion provider. Default: `CompletionClient` against `COMPLETIONS_URL`.
    pub completions: Arc<dyn CompletionProvider>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(completions: Arc<dyn CompletionProvider>, pages: PageRenderer) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            completions,
            pages: Arc::new(pages),
        }
    }
}
