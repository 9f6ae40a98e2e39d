//! Axum route handlers for the JSON grading API.
//!
//! The API grades statelessly and does not touch the page's shells, except to
//! read the caller's for `GET /api/v1/session`.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::form::EssayDraft;
use crate::models::grading::GradingResult;
use crate::shell::SubmitRejection;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub essay_text: String,
    #[serde(default)]
    pub assignment_prompt: Option<String>,
}

/// POST /api/v1/grade
///
/// Grades one essay and returns the result document. Essays at or under the
/// character gate are rejected before any model call.
pub async fn handle_grade(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> Result<Json<GradingResult>, AppError> {
    let draft = EssayDraft::new(
        request.essay_text,
        request.assignment_prompt.unwrap_or_default(),
    );
    let thresholds = &state.config.thresholds;

    if !draft.meets_submission_gate(thresholds) {
        return Err(SubmitRejection::TooShort {
            chars: crate::form::trimmed_char_count(&draft.essay_text),
            required: thresholds.min_essay_chars,
        }
        .into());
    }

    let result = state
        .grader
        .grade(&draft.essay_text, draft.assignment_prompt())
        .await?;

    Ok(Json(result))
}

/// GET /api/v1/session
///
/// Snapshot of the caller's shell: status, form flags, and result or error.
pub async fn handle_session(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;
    let snapshot = client.shell.lock().await.snapshot();
    (client.set_cookie(), Json(snapshot))
}
