//! HTML handlers for the form page.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use tracing::debug;

use crate::errors::AppError;
use crate::form::FormData;
use crate::session::{submit, SubmissionOutcome};
use crate::state::AppState;

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let session = state.session.lock().await;
    Ok(Html(state.pages.render(&session)?))
}

/// POST /
///
/// Full form post. Validation errors come back inline on the page; completion
/// failures leave the page exactly as it was.
pub async fn handle_submit(
    State(state): State<AppState>,
    Form(data): Form<FormData>,
) -> Result<Html<String>, AppError> {
    state.session.lock().await.form.apply(data);

    match submit(&state.session, state.completions.as_ref()).await {
        SubmissionOutcome::Blocked(errors) => debug!(%errors, "form re-rendered with errors"),
        SubmissionOutcome::Completed(_) => debug!("form re-rendered with new answer"),
        SubmissionOutcome::Failed(_) => debug!("form re-rendered unchanged after failure"),
    }

    let session = state.session.lock().await;
    Ok(Html(state.pages.render(&session)?))
}

/// POST /reset
pub async fn handle_reset(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.reset();
    Redirect::to("/")
}
