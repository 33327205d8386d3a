use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every error response: `{"kind": "...", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

/// Build an error response with the shared body shape.
///
/// Service error enums call this from their `IntoResponse` impls after picking
/// the status and kind.
pub fn error_response(
    status: StatusCode,
    kind: &'static str,
    message: impl Into<String>,
) -> Response {
    let body = ErrorBody {
        kind,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}
