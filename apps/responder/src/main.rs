mod config;
mod errors;
mod form;
mod generation;
mod llm_client;
mod render;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::render::PageRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; only malformed values are fatal
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Responder v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let completions = CompletionClient::new(
        config.completions_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!(
        "Completion client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        completions.endpoint()
    );

    let pages = PageRenderer::new()?;

    let state = AppState::new(Arc::new(completions), pages);

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.bind_addr, config.port);
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
