//! End-to-end HTTP tests: router -> service -> repository -> in-memory SQLite.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use quill_config::{DatabaseConfig, ServerConfig};
use quill_repository::{MemoryAuditLog, SqliteUserRepository, StorageHandle};
use quill_rest::{create_router_with_state, AppState};
use quill_service::UserServiceImpl;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    storage: Arc<dyn StorageHandle>,
    audit: Arc<MemoryAuditLog>,
}

async fn test_app() -> TestApp {
    let audit = Arc::new(MemoryAuditLog::new());
    let repo = SqliteUserRepository::connect(&DatabaseConfig::in_memory(), audit.clone())
        .await
        .unwrap();
    let storage = repo.storage();
    let service = Arc::new(UserServiceImpl::new(Arc::new(repo)));
    let state = AppState::new(service, storage.clone());

    TestApp {
        router: create_router_with_state(state, &ServerConfig::default()),
        storage,
        audit,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = test_app().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/users",
            Some(json!({"name": "Alice", "email": "a@x.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user"], json!({"id": 1, "name": "Alice", "email": "a@x.com"}));

    let (status, body) = app
        .send(
            Method::PUT,
            "/users/1",
            Some(json!({"email": "alice@x.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated");
    assert_eq!(
        body["user"],
        json!({"id": 1, "name": "Alice", "email": "alice@x.com"})
    );

    let (status, body) = app.send(Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User found");
    assert_eq!(body["user"]["email"], "alice@x.com");

    let (status, body) = app.send(Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");
    assert_eq!(
        body["user"],
        json!({"id": 1, "name": "Alice", "email": "alice@x.com"})
    );

    let (status, body) = app.send(Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "NOT_FOUND");

    let actions: Vec<String> = app
        .audit
        .entries()
        .iter()
        .map(|e| e.message.clone())
        .collect();
    assert_eq!(actions, vec!["User created", "User updated", "User deleted"]);
}

#[tokio::test]
async fn test_list_users_returns_bare_array() {
    let app = test_app().await;

    let (status, body) = app.send(Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    app.send(
        Method::POST,
        "/users",
        Some(json!({"name": "Alice", "email": "a@x.com"})),
    )
    .await;

    let (_, body) = app.send(Method::GET, "/users", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Alice");
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let app = test_app().await;

    let (status, body) = app
        .send(Method::POST, "/users", Some(json!({"name": "", "email": "nope"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app.send(Method::POST, "/users", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, body) = app.send(Method::GET, "/users", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send_request(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_non_integer_id_is_bad_request() {
    let app = test_app().await;

    let (status, body) = app.send(Method::GET, "/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_without_fields_is_bad_request() {
    let app = test_app().await;
    app.send(
        Method::POST,
        "/users",
        Some(json!({"name": "Alice", "email": "a@x.com"})),
    )
    .await;

    let (status, body) = app.send(Method::PATCH, "/users/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("No fields to update"));
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = test_app().await;

    let (status, body) = app
        .send(Method::PATCH, "/users/99", Some(json!({"name": "Ghost"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let app = test_app().await;

    let (status, _) = app.send(Method::DELETE, "/users/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_with_articles() {
    let app = test_app().await;
    app.send(
        Method::POST,
        "/users",
        Some(json!({"name": "Alice", "email": "a@x.com"})),
    )
    .await;

    let (status, body) = app.send(Method::GET, "/users/1/articles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User and articles found");
    assert_eq!(body["user"]["articles"], json!([]));

    sqlx::query("INSERT INTO articles (user_id, title, content) VALUES (1, 'Hello', 'World')")
        .execute(app.storage.pool())
        .await
        .unwrap();

    let (_, body) = app.send(Method::GET, "/users/1/articles", None).await;
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["articles"][0]["title"], "Hello");
    assert_eq!(body["user"]["articles"][0]["user_id"], 1);

    let (status, _) = app.send(Method::GET, "/users/2/articles", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app().await;

    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "quill");

    let (status, _) = app.send(Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "up");

    app.storage.close().await;
    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let app = test_app().await;
    app.storage.close().await;

    let (status, body) = app.send(Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;

    let (status, body) = app.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users/{id}/articles"].is_object());
    assert_eq!(body["info"]["version"], env!("CARGO_PKG_VERSION"));
}
