//! Shared helpers for HTTP integration tests.
//!
//! Every test builds the production router via [`build_test_app`] and drives
//! it with `tower::ServiceExt::oneshot`, so the full middleware stack is
//! exercised without binding a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use hrdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use hrdesk_api::auth::password::hash_password;
use hrdesk_api::config::ServerConfig;
use hrdesk_api::router::build_app_router;
use hrdesk_api::state::AppState;
use hrdesk_db::models::user::{CreateUser, User};
use hrdesk_db::repositories::UserRepo;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upcoming_events_days: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 30,
        },
    }
}

/// Build the full application router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and the given role.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        name: format!("Test {role}"),
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Sign an access token for `user` with the test JWT secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &user.email, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create a user with `role` and return a token for them.
pub async fn token_with_role(pool: &PgPool, role: &str) -> String {
    let user = create_user(pool, &format!("{role}@company.com"), role).await;
    token_for(&user)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Request body for a valid new employee with code `code`.
pub fn employee_body(code: &str) -> Value {
    serde_json::json!({
        "name": format!("Employee {code}"),
        "employee_id": code,
        "email": format!("{}@company.com", code.to_lowercase()),
        "department": "Engineering",
        "manager": "Grace Hopper",
        "start_date": "2025-03-10",
    })
}

/// Create an employee through the API and return the `data` object.
pub async fn create_employee(app: Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app, "/api/v1/employees", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
