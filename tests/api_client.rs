//! Tests for the admin API client against a mock backend.
//!
//! The client is blocking, so every call runs on tokio's blocking pool while
//! the mock server keeps serving on the runtime.

use laundry_accounts::api::{
    ApiClient, BulkGenerateRequest, BulkGenerationSummary, GenerationStatus, Role,
};
use laundry_accounts::error::AppError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"roomNumber": "admin", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("set-cookie", "JSESSIONID=abc123; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn login_and_generate(
    base_url: String,
    request: BulkGenerateRequest,
) -> Result<BulkGenerationSummary, AppError> {
    let api = ApiClient::new(&base_url)?;
    api.login("admin", "secret")?;
    api.bulk_generate(&request)
}

async fn run_blocking(
    base_url: String,
    request: BulkGenerateRequest,
) -> Result<BulkGenerationSummary, AppError> {
    tokio::task::spawn_blocking(move || login_and_generate(base_url, request))
        .await
        .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn generate_reuses_login_session() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;

    Mock::given(method("POST"))
        .and(path("/api/users/bulk/generate"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .and(body_json(json!({
            "rooms": ["0101", "0102"],
            "overwriteExisting": true,
            "role": "STAFF",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1,
            "updated": 1,
            "skipped": 0,
            "credentials": [
                {"roomNumber": "0101", "password": "abcdEFGH2345", "status": "CREATED"},
                {"roomNumber": "0102", "password": "zyxwVUTS9876", "status": "UPDATED"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = BulkGenerateRequest {
        rooms: vec!["0101".into(), "0102".into()],
        overwrite_existing: Some(true),
        role: Some(Role::Staff),
        ..Default::default()
    };
    // Trailing slash on the host must not produce `//auth/login`.
    let summary = run_blocking(format!("{}/", server.uri()), request)
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.credentials.len(), 2);
    assert_eq!(summary.credentials[1].status, GenerationStatus::Updated);
    assert_eq!(
        summary.credentials[0].password.as_deref(),
        Some("abcdEFGH2345")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_login_is_invalid_credentials() {
    let server = MockServer::start().await;
    mount_login(&server, 401).await;
    Mock::given(path("/api/users/bulk/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = BulkGenerateRequest {
        rooms: vec!["0101".into()],
        ..Default::default()
    };
    let err = run_blocking(server.uri(), request).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_carries_status_and_body() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/users/bulk/generate"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Password length must be at least 8."),
        )
        .mount(&server)
        .await;

    let request = BulkGenerateRequest {
        rooms: vec!["0101".into()],
        password_length: Some(4),
        ..Default::default()
    };
    let err = run_blocking(server.uri(), request).await.unwrap_err();
    match err {
        AppError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "Password length must be at least 8.");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_summary_is_unexpected_response() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/users/bulk/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"credentials": "oops"})))
        .mount(&server)
        .await;

    let request = BulkGenerateRequest {
        rooms: vec!["0101".into()],
        ..Default::default()
    };
    let err = run_blocking(server.uri(), request).await.unwrap_err();
    assert!(matches!(err, AppError::UnexpectedResponse(_)));
}

// Longer than reqwest's default 30 s request timeout.
#[tokio::test(flavor = "multi_thread")]
async fn slow_generation_is_waited_for() {
    let server = MockServer::start().await;
    mount_login(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/api/users/bulk/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(32))
                .set_body_json(json!({
                    "created": 1,
                    "credentials": [
                        {"roomNumber": "0101", "password": "abcdEFGH2345", "status": "CREATED"},
                    ],
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = BulkGenerateRequest {
        rooms: vec!["0101".into()],
        ..Default::default()
    };
    let summary = run_blocking(server.uri(), request).await.unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.credentials[0].status, GenerationStatus::Created);
}
