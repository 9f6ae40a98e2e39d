//! Background grading task: one per dispatch, no cancellation.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::grading::grader::EssayGrader;
use crate::shell::{Dispatch, SharedShell, GRADING_FAILED_MESSAGE};

/// Sends the dispatched essay to the grader and records the outcome.
/// The shell lock is only taken after the grader returns.
pub async fn run_grading(shell: SharedShell, grader: Arc<dyn EssayGrader>, dispatch: Dispatch) {
    let request_id = dispatch.request_id;

    let outcome = grader
        .grade(&dispatch.essay_text, dispatch.assignment_prompt.as_deref())
        .await
        .map_err(|e| {
            error!("Grading request {request_id} failed ({}): {e}", e.code());
            GRADING_FAILED_MESSAGE.to_string()
        });

    let succeeded = outcome.is_ok();
    if shell.lock().await.complete(request_id, outcome) && succeeded {
        info!("Grading request {request_id} complete");
    }
}

pub fn spawn_grading(
    shell: SharedShell,
    grader: Arc<dyn EssayGrader>,
    dispatch: Dispatch,
) -> JoinHandle<()> {
    tokio::spawn(run_grading(shell, grader, dispatch))
}
