use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use relay_config::DEFAULT_CONFIG_PATH;
use relay_testing::resend::FakeResend;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

const API_KEY: &str = "re_test_key";

#[tokio::test]
async fn contact_request_is_relayed() {
    // Arrange
    let (router, fake) = make_sut(Some(API_KEY)).await;

    // Act
    let (status, body) = post(router, submission()).await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Email sent successfully"));

    let outbox = fake.outbox().await;
    assert_eq!(outbox.len(), 1);
    let email = &outbox[0];
    assert_eq!(body["data"]["id"], json!(email.id));
    assert_eq!(email.to, ["contact@example.com"]);
    assert_eq!(email.from, "Contact Form <onboarding@resend.dev>");
    assert_eq!(email.reply_to.as_deref(), Some("erika@bar-baz.example"));
    assert!(email.subject.contains("Bar & Baz"));
    assert!(email.subject.contains("Erika Musterfrau"));

    let html = email.html.as_deref().unwrap();
    assert!(html.contains("&lt;script&gt;alert('pwned')&lt;/script&gt;<br/>Please call me back."));
    assert!(!html.contains("<script>"));
    assert!(html.contains("Bar &amp; Baz"));
}

#[tokio::test]
async fn identical_requests_are_sent_twice() {
    // Arrange
    let (router, fake) = make_sut(Some(API_KEY)).await;

    // Act
    let (first, _) = post(router.clone(), submission()).await;
    let (second, _) = post(router, submission()).await;

    // Assert
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CREATED);
    let outbox = fake.outbox().await;
    assert_eq!(outbox.len(), 2);
    assert_ne!(outbox[0].id, outbox[1].id);
}

#[tokio::test]
async fn invalid_submission_is_not_sent() {
    // Arrange
    let (router, fake) = make_sut(Some(API_KEY)).await;
    let mut request = submission();
    request["businessEmail"] = json!("erika");

    // Act
    let (status, body) = post(router, request).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([{"field": "businessEmail", "message": "Invalid email address"}])
    );
    assert!(fake.outbox().await.is_empty());
}

#[tokio::test]
async fn missing_api_key() {
    // Arrange
    let (router, fake) = make_sut(None).await;

    // Act
    let (status, body) = post(router, submission()).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "message": "Failed to send email"})
    );
    assert!(fake.outbox().await.is_empty());
}

fn submission() -> Value {
    json!({
        "fullName": "Erika Musterfrau",
        "company": "Bar & Baz",
        "companySize": "1-10",
        "businessEmail": "erika@bar-baz.example",
        "message": "<script>alert('pwned')</script>\nPlease call me back.",
    })
}

async fn post(router: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&body).unwrap())
}

async fn make_sut(api_key: Option<&str>) -> (Router, FakeResend) {
    let fake = FakeResend::new(API_KEY);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fake.clone().serve(listener));

    let api_url = format!("email.api_url = \"http://{addr}/\"");
    let mut overrides = vec![api_url.as_str()];
    let api_key = api_key.map(|key| format!("email.api_key = \"{key}\""));
    overrides.extend(api_key.as_deref());

    let config =
        relay_config::load_with_override(&[Path::new(DEFAULT_CONFIG_PATH)], &overrides).unwrap();
    let email = relay::email::connect(&config.email).unwrap();
    let router = relay::environment::build(&config, email).unwrap().router();

    (router, fake)
}
