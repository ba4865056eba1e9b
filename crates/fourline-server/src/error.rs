//! Error types for the REST side of the room server.
//!
//! [`ApiError`] can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! `WebSocket` failures never surface here: lobby errors are turned into
//! `error` events by the event router instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the REST handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested room is not open.
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RoomNotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
