//! Sign-up / sign-in against a wiremock backend.

use std::sync::Arc;

use api::{ApiConfig, ApiError, AuthClient, Gateway, HeadlessNavigator};
use store::{KeyValueStore, MemoryStore, SessionStore, SESSION_KEY};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, durable: &MemoryStore) -> AuthClient<MemoryStore, HeadlessNavigator> {
    let sessions = Arc::new(SessionStore::new(durable.clone()));
    let gateway = Gateway::new(
        ApiConfig::with_api_url(server.uri()),
        sessions,
        HeadlessNavigator::new("tasks.example.com"),
    );
    AuthClient::new(gateway)
}

fn auth_body(id: i64, email: &str, token: &str) -> serde_json::Value {
    serde_json::json!({
        "user": {"id": id, "email": email},
        "accessToken": token,
    })
}

#[tokio::test]
async fn register_stores_new_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(serde_json::json!({"email": "a@b.com", "password": "Secret123"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body(1, "a@b.com", "jwt-1")))
        .expect(1)
        .mount(&server)
        .await;

    let durable = MemoryStore::new();
    let client = client_for(&server, &durable);
    let session = client.register(" a@b.com ", "Secret123").await.unwrap();

    assert_eq!(session.user.email, "a@b.com");
    assert!(!session.access_token.is_empty());
    assert_eq!(client.current_user().unwrap().id, 1);
    assert!(durable.get(SESSION_KEY).unwrap().is_some());

    // No bearer header on the public endpoint
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn register_rejects_weak_password_locally() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, &MemoryStore::new());
    let err = client.register("a@b.com", "short").await.unwrap_err();

    match err {
        ApiError::Validation(problems) => {
            assert!(problems.contains(&"Password must be at least 8 characters".to_string()));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(client.current_user().is_none());
}

#[tokio::test]
async fn register_conflict_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, &MemoryStore::new());
    let err = client.register("a@b.com", "Secret123").await.unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Email already registered");
    assert!(client.current_user().is_none());
}

#[tokio::test]
async fn login_with_bad_credentials_keeps_existing_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let navigator = HeadlessNavigator::new("tasks.example.com");
    let sessions = Arc::new(SessionStore::new(MemoryStore::new()));
    let gateway = Gateway::new(
        ApiConfig::with_api_url(server.uri()),
        sessions,
        navigator.clone(),
    );
    let client = AuthClient::new(gateway);

    let err = client.login("a@b.com", "Wrong1234").await.unwrap_err();

    // A 401 here is an application error, not a credential teardown
    assert!(!err.requires_login());
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn login_then_logout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(4, "me@x.io", "jwt-4")))
        .mount(&server)
        .await;

    let durable = MemoryStore::new();
    let client = client_for(&server, &durable);

    let session = client.login("me@x.io", "Secret123").await.unwrap();
    assert_eq!(session.access_token, "jwt-4");

    client.logout();
    assert!(client.current_user().is_none());
    assert!(durable.is_empty());
}

#[tokio::test]
async fn login_with_unparsable_error_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, &MemoryStore::new());
    let err = client.login("a@b.com", "Secret123").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
}

#[tokio::test]
async fn login_with_malformed_success_body_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "x"})))
        .mount(&server)
        .await;

    let durable = MemoryStore::new();
    let client = client_for(&server, &durable);
    let err = client.login("a@b.com", "Secret123").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(durable.is_empty());
}

#[tokio::test]
async fn login_with_blank_token_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(1, "a@b.com", "  ")))
        .mount(&server)
        .await;

    let durable = MemoryStore::new();
    let client = client_for(&server, &durable);
    let err = client.login("a@b.com", "Secret123").await.unwrap_err();

    match err {
        ApiError::Decode { endpoint, source } => {
            assert_eq!(endpoint, "/api/auth/login");
            assert!(source.to_string().contains("empty accessToken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(client.current_user().is_none());
    assert!(durable.is_empty());
}
