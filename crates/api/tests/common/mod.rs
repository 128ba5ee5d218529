#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use forge_core::meal::MessClock;
use forge_core::roles::Role;
use forge_core::types::UserId;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use forge_api::auth::jwt::{generate_access_token, JwtConfig, JwtIdentityProvider};
use forge_api::config::ServerConfig;
use forge_api::router::build_app_router;
use forge_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        issuer: None,
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        mess_utc_offset_minutes: 330,
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        jwt: test_jwt_config(),
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(JwtIdentityProvider::new(config.jwt.clone())),
        clock: MessClock::from_offset_minutes(config.mess_utc_offset_minutes).unwrap(),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for `user_id` with `role`.
pub fn token_for(user_id: UserId, role: Role) -> String {
    generate_access_token(user_id, role, &test_jwt_config()).expect("token minting failed")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, token: Option<&str>, body: String) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    post_raw(app, uri, Some(token), body.to_string()).await
}
