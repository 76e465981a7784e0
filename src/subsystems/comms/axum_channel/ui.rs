//! Front-end page handler.
//!
//! The page is read from disk on every request so it can be edited without
//! a restart.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::AppState;

const NOT_FOUND_TEXT: &str = "index.html not found";

/// GET /: serve the configured index file verbatim.
pub(super) async fn index(State(state): State<AppState>) -> Response {
    match tokio::fs::read(state.index_file.as_path()).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=UTF-8")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(path = %state.index_file.display(), error = %e, "index page unavailable");
            plain(StatusCode::NOT_FOUND, NOT_FOUND_TEXT)
        }
    }
}

/// Any method on `/` other than GET/HEAD.
pub(super) async fn method_not_allowed() -> Response {
    plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn plain(status: StatusCode, text: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")], text).into_response()
}
