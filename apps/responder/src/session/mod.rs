//! Session — the one form/result state of the page and its transitions.
//!
//! Submitting validates under the lock, releases it for the network call, and
//! re-locks to record the outcome. Completion failures are logged and kept in
//! `SubmissionStatus` for diagnostics; the displayed answer is never touched
//! by a failure.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::form::{FormErrors, FormState};
use crate::generation::build_prompt;
use crate::llm_client::CompletionProvider;

/// Completion text currently displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// How the most recently resolved submission ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Completed,
    Failed {
        reason: String,
    },
}

/// What one call to [`submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The form did not validate; the provider was not called.
    Blocked(FormErrors),
    Completed(String),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    pub form: FormState,
    answer: Option<Answer>,
    status: SubmissionStatus,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Clears the form and the displayed answer in one step.
    pub fn reset(&mut self) {
        self.form.clear();
        self.answer = None;
        self.status = SubmissionStatus::Idle;
    }

    pub(crate) fn record_answer(&mut self, text: String) {
        self.answer = Some(Answer {
            text,
            generated_at: Utc::now(),
        });
        self.status = SubmissionStatus::Completed;
    }

    fn record_failure(&mut self, reason: String) {
        self.status = SubmissionStatus::Failed { reason };
    }
}

/// Runs one submission against the session's current form.
///
/// Concurrent submissions are neither deduplicated nor cancelled: each one
/// resolves on its own and the last success owns the answer.
pub async fn submit(session: &Mutex<Session>, provider: &dyn CompletionProvider) -> SubmissionOutcome {
    let submission_id = Uuid::new_v4();

    let (prompt, credential) = {
        let mut session = session.lock().await;
        session.form.mark_submitted();
        match session.form.validate() {
            Ok(valid) => (build_prompt(&valid), valid.credential),
            Err(errors) => {
                warn!(%submission_id, %errors, "submission blocked by validation");
                return SubmissionOutcome::Blocked(errors);
            }
        }
    };

    info!(%submission_id, prompt_chars = prompt.chars().count(), "sending completion request");

    match provider.complete(&prompt, &credential).await {
        Ok(text) => {
            info!(%submission_id, answer_chars = text.chars().count(), "completion received");
            session.lock().await.record_answer(text.clone());
            SubmissionOutcome::Completed(text)
        }
        Err(e) => {
            error!(%submission_id, "completion request failed: {e}");
            let reason = e.to_string();
            session.lock().await.record_failure(reason.clone());
            SubmissionOutcome::Failed(reason)
        }
    }
}
