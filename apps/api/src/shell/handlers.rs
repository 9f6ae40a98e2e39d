//! Page handlers. Every request resolves the caller's shell from the client
//! cookie; every POST updates it and redirects back to `/`.

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect},
};
use tracing::{debug, info, warn};

use crate::form::upload::read_submission;
use crate::render::page::render_page;
use crate::shell::task::spawn_grading;
use crate::state::AppState;

/// GET /
pub async fn handle_page(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;
    let html = render_page(&*client.shell.lock().await);
    (client.set_cookie(), Html(html))
}

/// POST /grade
///
/// Saves the typed text, then dispatches a grading request if the essay passes
/// the length gate. A rejected essay just re-renders with its text intact. A
/// form that could not be read in full, or that carries no essay, dispatches
/// nothing.
pub async fn handle_grade_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;

    let submission = match read_submission(multipart).await {
        Ok(submission) if submission.essay.is_some() => submission,
        Ok(_) => {
            warn!("Grade form from client {} had no essay field", client.client_id);
            return (client.set_cookie(), Redirect::to("/"));
        }
        Err(e) => {
            warn!("Could not read grade form from client {}: {e}", client.client_id);
            return (client.set_cookie(), Redirect::to("/"));
        }
    };

    let dispatch = {
        let mut shell = client.shell.lock().await;
        submission.apply_text(&mut shell.draft);
        match shell.submit() {
            Ok(dispatch) => Some(dispatch),
            Err(rejection) => {
                info!("Submission rejected: {rejection}");
                None
            }
        }
    };

    if let Some(dispatch) = dispatch {
        spawn_grading(client.shell.clone(), state.grader.clone(), dispatch);
    }

    (client.set_cookie(), Redirect::to("/"))
}

/// POST /upload
///
/// Replaces the essay with an uploaded `.txt`/`.md` file. Anything unreadable
/// leaves the essay as it was.
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;

    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            debug!("Could not read upload form: {e}");
            return (client.set_cookie(), Redirect::to("/"));
        }
    };

    {
        let mut shell = client.shell.lock().await;
        if shell.state.is_grading() {
            debug!("Ignoring upload while grading");
        } else {
            submission.apply_text(&mut shell.draft);
            if submission.apply_upload(&mut shell.draft) {
                debug!("Essay replaced from upload ({} words)", shell.draft.word_count());
            }
        }
    }

    (client.set_cookie(), Redirect::to("/"))
}

/// POST /reset
pub async fn handle_reset(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;
    client.shell.lock().await.reset();
    (client.set_cookie(), Redirect::to("/"))
}

/// POST /retry
pub async fn handle_retry(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let client = state.shells.resolve(&headers).await;
    client.shell.lock().await.retry();
    (client.set_cookie(), Redirect::to("/"))
}
