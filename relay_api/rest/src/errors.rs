use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiFieldError, ApiResponse};

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const INVALID_DATA: &str = "Invalid data";
pub const FAILED_TO_SEND_EMAIL: &str = "Failed to send email";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const NOT_FOUND: &str = "Not found";

/// Logs the error and responds with a generic message, the details are never
/// sent to the client.
pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

pub fn validation_error(errors: Vec<ApiFieldError>) -> Response {
    let response = ApiResponse {
        errors: Some(errors),
        ..ApiResponse::failure(INVALID_DATA)
    };
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}

pub fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResponse::failure(message))).into_response()
}

pub async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, NOT_FOUND)
}
