use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use relay_core_contact_contracts::ContactService;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Contact> {
    contact: Contact,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact) -> Self {
        Self { contact }
    }

    /// Serve the api until a shutdown signal (ctrl+c) is received.
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    /// Build the router with all routes and middlewares.
    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .fallback(errors::not_found);

        // The request id has to be assigned before the trace span is created,
        // so it is added last.
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        return std::future::pending().await;
    }
    info!("Shutting down http server");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use relay_core_contact_contracts::MockContactService;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn unknown_route() {
        // Arrange
        let sut = RestServer::new(MockContactService::new()).router();

        // Act
        let response = sut
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({"success": false, "message": "Not found"})
        );
    }

    #[tokio::test]
    async fn request_id_header() {
        // Arrange
        let sut = RestServer::new(MockContactService::new()).router();

        // Act
        let response = sut
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        let request_id = response.headers().get("X-Request-Id").unwrap();
        assert!(!request_id.is_empty());
    }
}
