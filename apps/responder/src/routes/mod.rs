pub mod api;
pub mod health;
pub mod page;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(page::handle_index).post(page::handle_submit))
        .route("/reset", post(page::handle_reset))
        // JSON API
        .route("/api/form", get(api::handle_get_form))
        .route("/api/form/fields/:field", put(api::handle_update_field))
        .route("/api/prompt", post(api::handle_preview_prompt))
        .route("/api/generate", post(api::handle_generate))
        .route("/api/reset", post(api::handle_reset))
        .with_state(state)
}
