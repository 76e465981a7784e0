//! Axum handlers for `/ask` and `/health`.
//!
//! Input validation happens here; the pipeline only ever sees a trimmed,
//! non-blank message.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{debug, trace};

use super::AppState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// JSON `{"error": msg}` with the given status.
fn json_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

/// Pull a usable message out of a raw `/ask` body.
fn extract_message(body: &[u8]) -> Result<String, &'static str> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("Empty body");
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| "Invalid JSON")?;
    let Value::Object(fields) = value else {
        return Err("Invalid JSON");
    };
    fields
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .ok_or("Missing 'message'")
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /ask
pub(super) async fn ask(State(state): State<AppState>, body: Bytes) -> Response {
    let message = match extract_message(&body) {
        Ok(m) => m,
        Err(reason) => {
            debug!(reason, "rejected /ask request");
            return json_error(StatusCode::BAD_REQUEST, reason);
        }
    };

    trace!(%message, "ask");
    let answer = state.pipeline.answer(&message).await;
    debug!(source = ?answer.source, "ask answered");
    (StatusCode::OK, Json(answer)).into_response()
}

/// Any method on `/ask` other than POST or OPTIONS.
pub(super) async fn method_not_allowed() -> Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> Json<Value> {
    let pipeline = &state.pipeline;
    Json(json!({
        "status": "ok",
        "name": &*state.name,
        "knowledge_entries": pipeline.knowledge().len(),
        "cache_entries": pipeline.cache().len(),
        "generator": if pipeline.generator().is_enabled() { "enabled" } else { "disabled" },
    }))
}
