//! Application shell: one client's view-state record and its transitions.
//!
//! `transition` is a pure function over `(ShellState, ShellEvent)`. `Shell`
//! wraps it with the draft, the request-id counter, and session timestamps.
//! Completions carry the id they were dispatched with; anything but the most
//! recent dispatch is dropped.

pub mod handlers;
pub mod sessions;
pub mod task;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::form::{EssayDraft, FormStatus, FormThresholds};
use crate::models::grading::GradingResult;

pub type RequestId = u64;

/// One client's shell. Never locked across the grading call.
pub type SharedShell = Arc<Mutex<Shell>>;

/// Shown for every grading failure, whatever the cause.
pub const GRADING_FAILED_MESSAGE: &str =
    "An error occurred while grading the essay. Please try again. Ensure your essay is text-based.";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ShellState {
    #[default]
    Idle,
    Grading {
        request_id: RequestId,
    },
    Complete {
        result: Box<GradingResult>,
    },
    Error {
        message: String,
    },
}

impl ShellState {
    pub fn status(&self) -> ShellStatus {
        match self {
            ShellState::Idle => ShellStatus::Idle,
            ShellState::Grading { .. } => ShellStatus::Grading,
            ShellState::Complete { .. } => ShellStatus::Complete,
            ShellState::Error { .. } => ShellStatus::Error,
        }
    }

    pub fn is_grading(&self) -> bool {
        matches!(self, ShellState::Grading { .. })
    }

    pub fn result(&self) -> Option<&GradingResult> {
        match self {
            ShellState::Complete { result } => Some(&**result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ShellState::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShellStatus {
    Idle,
    Grading,
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Submitted {
        request_id: RequestId,
    },
    Succeeded {
        request_id: RequestId,
        result: Box<GradingResult>,
    },
    Failed {
        request_id: RequestId,
        message: String,
    },
    /// "Grade another essay" from the results view.
    Reset,
    /// "Try again" from the error panel.
    Retry,
}

pub fn transition(state: ShellState, event: ShellEvent) -> ShellState {
    match (state, event) {
        (_, ShellEvent::Submitted { request_id }) => ShellState::Grading { request_id },
        (
            ShellState::Grading { request_id: current },
            ShellEvent::Succeeded { request_id, result },
        ) if current == request_id => ShellState::Complete { result },
        (
            ShellState::Grading { request_id: current },
            ShellEvent::Failed { request_id, message },
        ) if current == request_id => ShellState::Error { message },
        (ShellState::Complete { .. } | ShellState::Error { .. }, ShellEvent::Reset) => {
            ShellState::Idle
        }
        (ShellState::Error { .. }, ShellEvent::Retry) => ShellState::Idle,
        (state, _) => state,
    }
}

/// Why a submission was turned away before any request was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejection {
    TooShort { chars: usize, required: usize },
}

impl std::fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitRejection::TooShort { chars, required } => write!(
                f,
                "essay must be longer than {required} characters (got {chars})"
            ),
        }
    }
}

/// A grading request that has been recorded and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub request_id: RequestId,
    pub essay_text: String,
    pub assignment_prompt: Option<String>,
}

/// The shell: current state plus the form draft and session bookkeeping.
#[derive(Debug, Clone)]
pub struct Shell {
    pub state: ShellState,
    pub draft: EssayDraft,
    pub thresholds: FormThresholds,
    pub session_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    last_request_id: RequestId,
}

impl Shell {
    pub fn new(thresholds: FormThresholds) -> Self {
        Self {
            state: ShellState::Idle,
            draft: EssayDraft::default(),
            thresholds,
            session_id: Uuid::new_v4(),
            started_at: None,
            finished_at: None,
            last_request_id: 0,
        }
    }

    fn apply(&mut self, event: ShellEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event);
    }

    pub fn form_status(&self) -> FormStatus {
        FormStatus::of(&self.draft, &self.thresholds, self.state.is_grading())
    }

    /// Applies the length gate to the current draft and, if it passes, moves
    /// to `Grading` under a fresh request id.
    pub fn submit(&mut self) -> Result<Dispatch, SubmitRejection> {
        if !self.draft.meets_submission_gate(&self.thresholds) {
            return Err(SubmitRejection::TooShort {
                chars: crate::form::trimmed_char_count(&self.draft.essay_text),
                required: self.thresholds.min_essay_chars,
            });
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.apply(ShellEvent::Submitted { request_id });

        // A fresh grading session: new id, new timestamps
        self.session_id = Uuid::new_v4();
        self.started_at = Some(Utc::now());
        self.finished_at = None;

        info!(
            "Dispatching grading request {request_id} ({} words)",
            self.draft.word_count()
        );

        Ok(Dispatch {
            request_id,
            essay_text: self.draft.essay_text.clone(),
            assignment_prompt: self.draft.assignment_prompt().map(str::to_string),
        })
    }

    /// Records a grading outcome. Returns false when the outcome was stale.
    pub fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<GradingResult, String>,
    ) -> bool {
        if request_id != self.last_request_id || !self.state.is_grading() {
            warn!(
                "Dropping stale grading response {request_id} (latest is {})",
                self.last_request_id
            );
            return false;
        }

        let event = match outcome {
            Ok(result) => ShellEvent::Succeeded {
                request_id,
                result: Box::new(result),
            },
            Err(message) => ShellEvent::Failed {
                request_id,
                message,
            },
        };
        self.apply(event);
        self.finished_at = Some(Utc::now());
        true
    }

    pub fn reset(&mut self) {
        self.apply(ShellEvent::Reset);
    }

    pub fn retry(&mut self) {
        self.apply(ShellEvent::Retry);
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            session_id: self.session_id,
            status: self.state.status(),
            request_id: match self.state {
                ShellState::Grading { request_id } => Some(request_id),
                _ => None,
            },
            form: self.form_status(),
            thresholds: self.thresholds,
            result: self.state.result().cloned(),
            error: self.state.error().map(str::to_string),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}

/// Serializable view of the shell for the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct ShellSnapshot {
    pub session_id: Uuid,
    pub status: ShellStatus,
    pub request_id: Option<RequestId>,
    pub form: FormStatus,
    pub thresholds: FormThresholds,
    pub result: Option<GradingResult>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::fixtures::sample_result;

    fn essay_words(n: usize) -> String {
        (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    fn shell_with(essay: &str, prompt: &str) -> Shell {
        let mut shell = Shell::new(FormThresholds::default());
        shell.draft = EssayDraft::new(essay, prompt);
        shell
    }

    #[test]
    fn test_transition_submit_from_any_state() {
        for state in [
            ShellState::Idle,
            ShellState::Error {
                message: "x".into(),
            },
            ShellState::Complete {
                result: Box::new(sample_result()),
            },
        ] {
            let next = transition(state, ShellEvent::Submitted { request_id: 7 });
            assert_eq!(next, ShellState::Grading { request_id: 7 });
        }
    }

    #[test]
    fn test_transition_ignores_mismatched_ids() {
        let state = ShellState::Grading { request_id: 2 };
        let next = transition(
            state.clone(),
            ShellEvent::Succeeded {
                request_id: 1,
                result: Box::new(sample_result()),
            },
        );
        assert_eq!(next, state);

        let next = transition(
            state.clone(),
            ShellEvent::Failed {
                request_id: 1,
                message: "late".into(),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_transition_reset_and_retry() {
        let complete = ShellState::Complete {
            result: Box::new(sample_result()),
        };
        let error = ShellState::Error {
            message: "boom".into(),
        };

        assert_eq!(transition(complete.clone(), ShellEvent::Reset), ShellState::Idle);
        assert_eq!(transition(error.clone(), ShellEvent::Reset), ShellState::Idle);
        assert_eq!(transition(error, ShellEvent::Retry), ShellState::Idle);
        // Retry only applies to the error panel
        assert_eq!(transition(complete.clone(), ShellEvent::Retry), complete);
        // Reset is not an escape hatch while grading
        let grading = ShellState::Grading { request_id: 3 };
        assert_eq!(transition(grading.clone(), ShellEvent::Reset), grading);
    }

    #[test]
    fn test_transition_completion_outside_grading_is_ignored() {
        let next = transition(
            ShellState::Idle,
            ShellEvent::Succeeded {
                request_id: 1,
                result: Box::new(sample_result()),
            },
        );
        assert_eq!(next, ShellState::Idle);
    }

    #[test]
    fn test_short_essay_is_rejected_without_dispatch() {
        let mut shell = shell_with("Too short to grade.", "");
        let err = shell.submit().unwrap_err();
        assert_eq!(
            err,
            SubmitRejection::TooShort {
                chars: 19,
                required: 50
            }
        );
        assert_eq!(shell.state, ShellState::Idle);
        assert_eq!(shell.snapshot().request_id, None);
    }

    #[test]
    fn test_success_path_stores_result_unchanged() {
        let mut shell = shell_with(&essay_words(60), "");
        let dispatch = shell.submit().unwrap();
        assert_eq!(shell.state.status(), ShellStatus::Grading);
        assert_eq!(dispatch.assignment_prompt, None);

        assert!(shell.complete(dispatch.request_id, Ok(sample_result())));
        assert_eq!(shell.state.status(), ShellStatus::Complete);
        assert_eq!(shell.state.result(), Some(&sample_result()));
        assert!(shell.finished_at.is_some());
    }

    #[test]
    fn test_failure_path_keeps_no_result() {
        let mut shell = shell_with(&essay_words(60), "");
        let dispatch = shell.submit().unwrap();
        assert!(shell.complete(dispatch.request_id, Err(GRADING_FAILED_MESSAGE.to_string())));
        assert_eq!(shell.state.status(), ShellStatus::Error);
        assert_eq!(shell.state.result(), None);
        assert_eq!(shell.state.error(), Some(GRADING_FAILED_MESSAGE));
    }

    #[test]
    fn test_reset_and_retry_keep_the_draft() {
        let essay = essay_words(60);
        let mut shell = shell_with(&essay, "Discuss");
        let d = shell.submit().unwrap();
        shell.complete(d.request_id, Err("failed".into()));
        shell.retry();
        assert_eq!(shell.state, ShellState::Idle);
        assert_eq!(shell.draft, EssayDraft::new(essay.clone(), "Discuss"));

        let d = shell.submit().unwrap();
        shell.complete(d.request_id, Ok(sample_result()));
        shell.reset();
        assert_eq!(shell.state, ShellState::Idle);
        assert!(shell.snapshot().result.is_none());
        assert!(shell.snapshot().error.is_none());
        assert_eq!(shell.draft.essay_text, essay);
    }

    #[test]
    fn test_request_ids_increase() {
        let mut shell = shell_with(&essay_words(60), "");
        let first = shell.submit().unwrap().request_id;
        let second = shell.submit().unwrap().request_id;
        assert!(second > first);
    }

    #[test]
    fn test_stale_response_cannot_overwrite_newer_request() {
        let mut shell = shell_with(&essay_words(60), "");
        let old = shell.submit().unwrap();
        let new = shell.submit().unwrap();

        assert!(!shell.complete(old.request_id, Err("late failure".into())));
        assert_eq!(
            shell.state,
            ShellState::Grading {
                request_id: new.request_id
            }
        );

        assert!(shell.complete(new.request_id, Ok(sample_result())));
        assert_eq!(shell.state.status(), ShellStatus::Complete);
    }

    #[test]
    fn test_response_after_retry_is_dropped() {
        let mut shell = shell_with(&essay_words(60), "");
        let d = shell.submit().unwrap();
        shell.complete(d.request_id, Err("failed".into()));
        shell.retry();
        // A duplicate completion for the same request arrives late
        assert!(!shell.complete(d.request_id, Ok(sample_result())));
        assert_eq!(shell.state, ShellState::Idle);
    }

    #[test]
    fn test_dispatch_carries_prompt_verbatim() {
        let mut shell = shell_with(&essay_words(60), "  Discuss Kant  ");
        let dispatch = shell.submit().unwrap();
        assert_eq!(dispatch.assignment_prompt.as_deref(), Some("  Discuss Kant  "));
        assert_eq!(dispatch.essay_text, essay_words(60));
    }

    #[test]
    fn test_snapshot_serializes_status() {
        let mut shell = shell_with(&essay_words(60), "");
        shell.submit().unwrap();
        let json = serde_json::to_value(shell.snapshot()).unwrap();
        assert_eq!(json["status"], "GRADING");
        assert_eq!(json["request_id"], 1);
        assert_eq!(json["form"]["controls_disabled"], true);
    }
}
