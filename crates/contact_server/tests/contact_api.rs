use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use portfolio_contract::{
    ApiEnvelope, ContactField, ContactSubmission, HealthResponse, StoreStatus, MSG_CONTACT_SENT,
    MSG_INTERNAL_ERROR, MSG_INVALID_BODY, MSG_NOT_ALLOWED_BY_CORS, MSG_RATE_LIMITED,
    MSG_ROUTE_NOT_FOUND, MSG_STORE_FAILURE, MSG_VALIDATION_FAILED,
};
use pretty_assertions::assert_eq;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower::ServiceExt;

use contact_server::{
    create_router, AppState, Config, ContactStore, LoggingStore, StoreError, StoredContact,
};

#[derive(Default)]
struct RecordingStore {
    rows: Mutex<Vec<ContactSubmission>>,
}

impl RecordingStore {
    fn rows(&self) -> Vec<ContactSubmission> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactStore for RecordingStore {
    fn status(&self) -> StoreStatus {
        StoreStatus::Connected
    }

    fn name(&self) -> &'static str {
        "recording"
    }

    async fn insert(&self, submission: &ContactSubmission) -> Result<StoredContact, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        rows.push(submission.clone());
        Ok(StoredContact {
            id: rows.len().to_string(),
            created_at: Utc::now(),
        })
    }
}

struct FailingStore;

#[async_trait]
impl ContactStore for FailingStore {
    fn status(&self) -> StoreStatus {
        StoreStatus::Connected
    }

    fn name(&self) -> &'static str {
        "failing"
    }

    async fn insert(&self, _submission: &ContactSubmission) -> Result<StoredContact, StoreError> {
        Err(StoreError::Unavailable(
            "relation \"contacts\" does not exist".to_string(),
        ))
    }
}

struct PanickingStore;

#[async_trait]
impl ContactStore for PanickingStore {
    fn status(&self) -> StoreStatus {
        StoreStatus::Connected
    }

    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn insert(&self, _submission: &ContactSubmission) -> Result<StoredContact, StoreError> {
        panic!("connection pool poisoned at row 7");
    }
}

fn config() -> Config {
    Config {
        allowed_origins: vec!["https://portfolio.example.com".to_string()],
        ..Config::default()
    }
}

fn app_with(store: Arc<dyn ContactStore>) -> Router {
    create_router(AppState::new(Arc::new(config()), store))
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Ada Lovelace",
        "email": "Ada@Example.com",
        "subject": "Analytical engines",
        "message": "I would like to talk about your projects."
    })
}

fn post_contact(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_submission_is_stored_normalized() {
    let store = Arc::new(RecordingStore::default());
    let app = app_with(store.clone());

    let response = app
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["ratelimit-limit"], "10");
    assert_eq!(response.headers()["ratelimit-remaining"], "9");
    let envelope: ApiEnvelope = read_json(response).await;
    assert_eq!(envelope, ApiEnvelope::ok(MSG_CONTACT_SENT));

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "ada@example.com");
}

#[tokio::test]
async fn demo_mode_answers_like_persisted_mode() {
    let persisted = app_with(Arc::new(RecordingStore::default()))
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();
    let demo = app_with(Arc::new(LoggingStore))
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();

    assert_eq!(persisted.status(), demo.status());
    let persisted: ApiEnvelope = read_json(persisted).await;
    let demo: ApiEnvelope = read_json(demo).await;
    assert_eq!(persisted, demo);
}

#[tokio::test]
async fn short_name_is_rejected_with_field_error() {
    let store = Arc::new(RecordingStore::default());
    let mut body = valid_body();
    body["name"] = json!("A");

    let response = app_with(store.clone())
        .oneshot(post_contact(body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ApiEnvelope = read_json(response).await;
    assert!(!envelope.success);
    assert_eq!(envelope.message, MSG_VALIDATION_FAILED);
    assert_eq!(envelope.errors.len(), 1);
    assert_eq!(envelope.errors[0].field, ContactField::Name);
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn missing_fields_report_every_violation() {
    let response = app_with(Arc::new(LoggingStore))
        .oneshot(post_contact("{}".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ApiEnvelope = read_json(response).await;
    let fields: Vec<ContactField> = envelope.errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, ContactField::ALL.to_vec());
}

#[tokio::test]
async fn null_field_is_reported_as_field_error() {
    let mut body = valid_body();
    body["name"] = serde_json::Value::Null;

    let response = app_with(Arc::new(LoggingStore))
        .oneshot(post_contact(body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ApiEnvelope = read_json(response).await;
    assert_eq!(envelope.message, MSG_VALIDATION_FAILED);
    let fields: Vec<ContactField> = envelope.errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec![ContactField::Name]);
}

#[tokio::test]
async fn malformed_json_gets_invalid_body_envelope() {
    let response = app_with(Arc::new(LoggingStore))
        .oneshot(post_contact("{\"name\": ".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ApiEnvelope = read_json(response).await;
    assert_eq!(envelope, ApiEnvelope::failure(MSG_INVALID_BODY));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut body = valid_body();
    body["message"] = json!("x".repeat(20 * 1024));

    let response = app_with(Arc::new(LoggingStore))
        .oneshot(post_contact(body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let envelope: ApiEnvelope = read_json(response).await;
    assert!(!envelope.success);
}

#[tokio::test]
async fn eleventh_submission_in_window_is_rate_limited() {
    let app = app_with(Arc::new(LoggingStore));

    for _ in 0..10 {
        let response = app
            .clone()
            .oneshot(post_contact(valid_body().to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    let envelope: ApiEnvelope = read_json(response).await;
    assert_eq!(envelope, ApiEnvelope::failure(MSG_RATE_LIMITED));

    // The limiter answers before validation sees the body.
    let mut invalid = valid_body();
    invalid["email"] = json!("not-an-address");
    let response = app
        .clone()
        .oneshot(post_contact(invalid.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Health is outside the limiter.
    let health = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn forwarded_clients_are_limited_separately_behind_trusted_proxy() {
    let config = Config {
        rate_limit_max: 1,
        trust_proxy: true,
        ..config()
    };
    let app = create_router(AppState::new(Arc::new(config), Arc::new(LoggingStore)));

    let from = |ip: &str| {
        let mut request = post_contact(valid_body().to_string());
        request
            .headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        request
    };

    assert_eq!(
        app.clone().oneshot(from("203.0.113.1")).await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        app.clone().oneshot(from("203.0.113.2")).await.unwrap().status(),
        StatusCode::OK
    );
    assert_eq!(
        app.oneshot(from("203.0.113.1")).await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn health_reports_store_state() {
    let demo = app_with(Arc::new(LoggingStore))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(demo.status(), StatusCode::OK);
    let demo: HealthResponse = read_json(demo).await;
    assert_eq!(demo.status, "OK");
    assert_eq!(demo.supabase, StoreStatus::NotConfigured);
    assert!(chrono::DateTime::parse_from_rfc3339(&demo.timestamp).is_ok());

    let persisted = app_with(Arc::new(RecordingStore::default()))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let raw: serde_json::Value = read_json(persisted).await;
    assert_eq!(raw["supabase"], "connected");
}

#[tokio::test]
async fn unknown_routes_get_not_found_envelope() {
    for request in [
        Request::get("/nope").body(Body::empty()).unwrap(),
        Request::get("/api/contact").body(Body::empty()).unwrap(),
    ] {
        let response = app_with(Arc::new(LoggingStore))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let envelope: ApiEnvelope = read_json(response).await;
        assert_eq!(envelope, ApiEnvelope::failure(MSG_ROUTE_NOT_FOUND));
    }
}

#[tokio::test]
async fn disallowed_origin_is_forbidden() {
    let store = Arc::new(RecordingStore::default());
    let mut request = post_contact(valid_body().to_string());
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.example.net".parse().unwrap());

    let response = app_with(store.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let envelope: ApiEnvelope = read_json(response).await;
    assert_eq!(envelope, ApiEnvelope::failure(MSG_NOT_ALLOWED_BY_CORS));
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn configured_and_loopback_origins_get_cors_headers() {
    for origin in ["https://portfolio.example.com", "http://localhost:5173"] {
        let mut request = post_contact(valid_body().to_string());
        request
            .headers_mut()
            .insert(header::ORIGIN, origin.parse().unwrap());

        let response = app_with(Arc::new(LoggingStore))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin
        );
    }
}

#[tokio::test]
async fn store_failure_returns_generic_error() {
    let response = app_with(Arc::new(FailingStore))
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("relation"));
    let envelope: ApiEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(envelope, ApiEnvelope::failure(MSG_STORE_FAILURE));
}

#[tokio::test]
async fn handler_panic_returns_generic_error_and_server_keeps_serving() {
    let app = app_with(Arc::new(PanickingStore));

    let response = app
        .clone()
        .oneshot(post_contact(valid_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("row 7"));
    let envelope: ApiEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(envelope, ApiEnvelope::failure(MSG_INTERNAL_ERROR));

    let health = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}
