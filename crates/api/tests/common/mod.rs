//! Shared helpers for API integration tests: a test router wired to a real
//! database pool, user seeding, token minting, and request plumbing.

#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use gigboard_api::auth::jwt::{generate_access_token, JwtConfig};
use gigboard_api::config::ServerConfig;
use gigboard_api::notify::{NoopSink, Notifier};
use gigboard_api::state::AppState;
use gigboard_api::{routes, ws};
use gigboard_core::roles::Role;
use gigboard_db::models::user::{CreateUser, User};
use gigboard_db::repositories::UserRepo;

const TEST_JWT_SECRET: &str = "integration-test-secret-not-for-production";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build the application router backed by the given pool.
///
/// Mirrors the production router (health at root, API under `/api/v1`) but
/// uses a fixed JWT secret and a no-op notification sink. Notifications are
/// still persisted, so tests can assert on them through the API.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    };

    let ws_manager = Arc::new(ws::WsManager::new());
    let notifier = Arc::new(Notifier::new(pool.clone(), Arc::new(NoopSink)));

    let state = AppState {
        pool,
        config: Arc::new(config),
        ws_manager,
        notifier,
    };

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create a user and mint a matching access token.
pub async fn seed_user(pool: &PgPool, email: &str, role: Role) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            fullname: format!("Test {}", role.as_str()),
            email: email.into(),
            role,
        },
    )
    .await
    .expect("seeding user should succeed");

    let token = generate_access_token(user.id, user.role.as_str(), &test_jwt_config())
        .expect("token generation should succeed");

    (user, token)
}

pub async fn seed_client(pool: &PgPool, email: &str) -> (User, String) {
    seed_user(pool, email, Role::Client).await
}

pub async fn seed_freelancer(pool: &PgPool, email: &str) -> (User, String) {
    seed_user(pool, email, Role::Freelancer).await
}

pub async fn seed_admin(pool: &PgPool, email: &str) -> (User, String) {
    seed_user(pool, email, Role::Admin).await
}

// ---------------------------------------------------------------------------
// Request plumbing
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, token, None).await
}

pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::PUT, uri, token, None).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Consume a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Domain fixtures
// ---------------------------------------------------------------------------

/// Create a published (ongoing, open) project through the API and return
/// its id.
pub async fn create_open_project(app: &Router, client_token: &str, title: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/projects",
        Some(client_token),
        serde_json::json!({
            "title": title,
            "description": "Integration test project",
            "budget": 5000,
            "tags": ["rust", "backend"],
            "deadline": "2027-01-01T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = body_json(response).await;
    body["data"]["id"].as_i64().expect("project id")
}

/// Apply to a project through the API and return the application id.
pub async fn apply_to_project(app: &Router, freelancer_token: &str, project_id: i64) -> i64 {
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/applications"),
        Some(freelancer_token),
        serde_json::json!({ "message": "I can do this" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);

    let body = body_json(response).await;
    body["data"]["id"].as_i64().expect("application id")
}
