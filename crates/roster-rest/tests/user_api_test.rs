//! End-to-end tests of the HTTP surface over the in-memory store and cache.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{HealthCheck, HealthStatus};
use roster_repository::InMemoryUserRepository;
use roster_rest::{create_router, AppState};
use roster_service::{CacheInterface, CacheSettings, MemoryCacheService, UserServiceImpl};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StaticCheck {
    name: &'static str,
    status: HealthStatus,
}

#[async_trait]
impl HealthCheck for StaticCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> HealthStatus {
        self.status.clone()
    }
}

struct TestApp {
    router: Router,
    cache: Arc<MemoryCacheService>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_checks(Vec::new())
    }

    fn with_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        let cache = Arc::new(MemoryCacheService::new());
        let service = UserServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            cache.clone(),
            CacheSettings::default(),
        );
        let state = checks
            .into_iter()
            .fold(AppState::new(Arc::new(service)), AppState::with_health_check);

        Self {
            router: create_router(state, &ServerConfig::default()),
            cache,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.send_raw(method, uri, body.map(|b| b.to_string())).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> axum::response::Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn create(&self, name: &str, email: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users",
                Some(json!({ "name": name, "email": email })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_create_then_get() {
    let app = TestApp::new();
    let id = app.create("Alice", "alice@example.com").await;

    let (status, body) = app.send(Method::GET, &format!("/api/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_get_populates_cache() {
    let app = TestApp::new();
    let id = app.create("Alice", "alice@example.com").await;
    let key = format!("user_{}", id);

    assert!(!app.cache.exists(&key).await.unwrap());
    app.send(Method::GET, &format!("/api/users/{}", id), None).await;
    assert!(app.cache.exists(&key).await.unwrap());
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/users/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/users",
            Some(json!({ "name": "Alice", "email": "not-an-email" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = TestApp::new();

    let response = app
        .send_raw(Method::POST, "/api/users", Some("{\"name\":".to_string()))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_writes_through() {
    let app = TestApp::new();
    let id = app.create("Alice", "alice@example.com").await;
    let uri = format!("/api/users/{}", id);

    let (status, body) = app
        .send(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Alicia", "email": "alicia@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alicia");
    assert!(app.cache.exists(&format!("user_{}", id)).await.unwrap());

    let (_, body) = app.send(Method::GET, &uri, None).await;
    assert_eq!(body["data"]["email"], "alicia@example.com");
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/users/5",
            Some(json!({ "name": "Ghost", "email": "ghost@example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_delete_evicts_and_removes() {
    let app = TestApp::new();
    let id = app.create("Alice", "alice@example.com").await;
    let uri = format!("/api/users/{}", id);
    app.send(Method::GET, &uri, None).await;

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert!(app.cache.is_empty());

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_is_204() {
    let app = TestApp::new();

    let (status, _) = app.send(Method::DELETE, "/api/users/77", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_filters_and_pages() {
    let app = TestApp::new();
    app.create("Alice", "alice@example.com").await;
    app.create("Bob", "bob@example.com").await;
    app.create("ALICIA", "alicia@example.com").await;

    let response = app
        .send_raw(Method::GET, "/api/users?name=ali&page=1&size=1", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "2");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "ALICIA");

    let (_, body) = app.send(Method::GET, "/api/users?name=ali&page=2&size=1", None).await;
    assert_eq!(body["data"][0]["name"], "Alice");
}

#[tokio::test]
async fn test_list_with_out_of_range_paging_is_400() {
    let app = TestApp::new();
    app.create("Alice", "alice@example.com").await;

    for uri in [
        "/api/users?page=4294967298&size=4294967297",
        "/api/users?name=ali&page=4294967298&size=4294967297",
    ] {
        let (status, body) = app.send(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_list_without_filter_returns_newest_first() {
    let app = TestApp::new();
    app.create("Alice", "alice@example.com").await;
    app.create("Bob", "bob@example.com").await;

    let (status, body) = app.send(Method::GET, "/api/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob", "Alice"]);
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = app.send(Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ready_tolerates_degraded_cache() {
    let app = TestApp::with_checks(vec![
        Arc::new(StaticCheck {
            name: "database",
            status: HealthStatus::Healthy,
        }),
        Arc::new(StaticCheck {
            name: "redis",
            status: HealthStatus::Degraded("disabled".to_string()),
        }),
    ]);

    let (status, body) = app.send(Method::GET, "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["components"]["database"], "healthy");
    assert_eq!(body["components"]["redis"], "degraded: disabled");
}

#[tokio::test]
async fn test_ready_fails_when_store_is_down() {
    let app = TestApp::with_checks(vec![Arc::new(StaticCheck {
        name: "database",
        status: HealthStatus::Unhealthy("connection refused".to_string()),
    })]);

    let (status, body) = app.send(Method::GET, "/ready", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users/{id}"].is_object());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new();

    let response = app.send_raw(Method::GET, "/live", None).await;

    assert!(response.headers().contains_key("x-request-id"));
}
