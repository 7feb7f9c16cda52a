use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

/// Emails to recipients with this local part are refused by the fake provider.
pub const REJECTED_LOCAL_PART: &str = "reject";

/// In-memory stand-in for the Resend email api.
#[derive(Debug, Clone)]
pub struct FakeResend {
    api_key: Arc<str>,
    outbox: Arc<Mutex<Vec<SentEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub reply_to: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
}

impl FakeResend {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.into(),
            outbox: Default::default(),
        }
    }

    /// Returns all emails that have been accepted so far.
    pub async fn outbox(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.clone()
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(EMAILS_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Api url: http://{host}:{port}/");
    info!("Api key: {api_key:?}");
    info!(
        "Emails to recipients with the local part {REJECTED_LOCAL_PART:?} are rejected with a \
         validation error"
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    FakeResend::new(&api_key).serve(listener).await
}

#[derive(Deserialize)]
struct SendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    reply_to: Option<String>,
    html: Option<String>,
    text: Option<String>,
}

#[derive(Serialize)]
struct SendResponse {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    name: &'static str,
    message: &'static str,
}

async fn send(
    state: State<FakeResend>,
    headers: HeaderMap,
    Json(request): Json<SendRequest>,
) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        None => {
            return error(
                StatusCode::UNAUTHORIZED,
                "missing_api_key",
                "Missing API key in the authorization header.",
            )
        }
        Some(token) if token != &*state.api_key => {
            return error(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid.")
        }
        Some(_) => {}
    }

    if request.to.is_empty()
        || request.subject.is_empty()
        || (request.html.is_none() && request.text.is_none())
    {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "The `to`, `subject` and `html` or `text` fields are required.",
        );
    }

    let rejected = request.to.iter().any(|recipient| {
        recipient
            .rsplit_once('<')
            .map_or(recipient.as_str(), |(_, address)| address)
            .starts_with(&format!("{REJECTED_LOCAL_PART}@"))
    });
    if rejected {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "The recipient has been rejected.",
        );
    }

    let id = Uuid::new_v4().to_string();
    state.outbox.lock().await.push(SentEmail {
        id: id.clone(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        reply_to: request.reply_to,
        html: request.html,
        text: request.text,
    });

    Json(SendResponse { id }).into_response()
}

fn error(status: StatusCode, name: &'static str, message: &'static str) -> Response {
    let body = ErrorResponse {
        status_code: status.as_u16(),
        name,
        message,
    };
    (status, Json(body)).into_response()
}
