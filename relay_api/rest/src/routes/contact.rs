use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use relay_core_contact_contracts::{ContactSendMessageError, ContactService};

use crate::{
    errors::{
        error, internal_server_error, validation_error, FAILED_TO_SEND_EMAIL, METHOD_NOT_ALLOWED,
    },
    models::{contact::ApiContactSubmission, ApiEmailSent, ApiFieldError, ApiResponse},
};

pub const CONTACT_ROUTE: &str = "/api/contact";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route(
            CONTACT_ROUTE,
            routing::post(send_message).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) => return internal_server_error(err),
    };

    let submission = match ApiContactSubmission::from_body(&body) {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return validation_error(vec![ApiFieldError {
                field: String::new(),
                message: "Expected object".into(),
            }])
        }
        Err(err) => return internal_server_error(err),
    };

    let submission = match submission.validate() {
        Ok(submission) => submission,
        Err(errors) => return validation_error(errors),
    };

    match service.send_message(submission).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(ApiResponse {
                success: true,
                message: "Email sent successfully",
                data: Some(ApiEmailSent { id }),
                errors: None,
            }),
        )
            .into_response(),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, FAILED_TO_SEND_EMAIL)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    (
        [(header::ALLOW, "POST")],
        error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED),
    )
        .into_response()
}
