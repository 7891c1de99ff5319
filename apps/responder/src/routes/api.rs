//! JSON handlers: per-keystroke validation, prompt preview, generation, reset.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::form::{mask, Field, FormData, FormState, Validity};
use crate::generation::build_prompt;
use crate::session::{submit, Answer, Session, SubmissionOutcome, SubmissionStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct FieldSnapshot {
    pub field: &'static str,
    /// The credential is masked.
    pub value: String,
    pub validity: Validity,
    pub aria_invalid: &'static str,
    pub message: Option<&'static str>,
}

impl FieldSnapshot {
    fn of(form: &FormState, field: Field) -> Self {
        let validity = form.validity(field).clone();
        let value = match field {
            Field::Credential => mask(form.value(field)),
            _ => form.value(field).to_string(),
        };
        Self {
            field: field.key(),
            value,
            aria_invalid: validity.aria_invalid(),
            message: validity.is_invalid().then(|| field.error_message()),
            validity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormSnapshot {
    pub fields: Vec<FieldSnapshot>,
    pub submitted: bool,
    pub answer: Option<Answer>,
    #[serde(flatten)]
    pub status: SubmissionStatus,
}

impl FormSnapshot {
    fn of(session: &Session) -> Self {
        Self {
            fields: Field::ALL
                .into_iter()
                .map(|f| FieldSnapshot::of(&session.form, f))
                .collect(),
            submitted: session.form.submitted(),
            answer: session.answer().cloned(),
            status: session.status().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub status: SubmissionStatus,
    /// The displayed answer after this submission (unchanged on failure).
    pub answer: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/form
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormSnapshot> {
    let session = state.session.lock().await;
    Json(FormSnapshot::of(&session))
}

/// PUT /api/form/fields/:field
///
/// Sets one field and returns its recomputed validity. Called on every keystroke.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<FieldUpdateRequest>,
) -> Result<Json<FieldSnapshot>, AppError> {
    let field = key.parse::<Field>()?;
    let mut session = state.session.lock().await;
    session.form.set(field, request.value);
    Ok(Json(FieldSnapshot::of(&session.form, field)))
}

/// POST /api/prompt
///
/// Builds the prompt for a form without sending it. Does not touch the session.
pub async fn handle_preview_prompt(
    Json(data): Json<FormData>,
) -> Result<Json<PromptResponse>, AppError> {
    let valid = data.validate().map_err(AppError::Validation)?;
    Ok(Json(PromptResponse {
        prompt: build_prompt(&valid),
    }))
}

/// POST /api/generate
///
/// Replaces the session form with the posted one and submits it.
/// A completion failure is reported in `status` but is not an HTTP error.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(data): Json<FormData>,
) -> Result<Json<GenerateResponse>, AppError> {
    state.session.lock().await.form.apply(data);

    let outcome = submit(&state.session, state.completions.as_ref()).await;
    let status = match outcome {
        SubmissionOutcome::Blocked(errors) => return Err(AppError::Validation(errors)),
        SubmissionOutcome::Completed(_) => SubmissionStatus::Completed,
        SubmissionOutcome::Failed(reason) => SubmissionStatus::Failed { reason },
    };

    let session = state.session.lock().await;
    Ok(Json(GenerateResponse {
        status,
        answer: session.answer().map(|a| a.text.clone()),
    }))
}

/// POST /api/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<FormSnapshot> {
    let mut session = state.session.lock().await;
    session.reset();
    Json(FormSnapshot::of(&session))
}
