//! Router-level tests for the authentication gate and request validation.
//!
//! These use a lazy connection pool, so everything exercised here must be
//! rejected before any query runs: missing or bad tokens, role checks,
//! and input validation.

use std::net::IpAddr;
use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use secrecy::SecretString;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use iceshopz_core::Role;
use iceshopz_server::config::ServerConfig;
use iceshopz_server::routes;
use iceshopz_server::services::Claims;
use iceshopz_server::state::AppState;

const JWT_SECRET: &str = "rQ8x!vN2#mK9$pL4@wD7&zB1*cF5^hJ3";

fn test_app() -> Router {
    let config = ServerConfig {
        database_url: SecretString::from("postgres://localhost:1/unreachable"),
        host: "127.0.0.1".parse::<IpAddr>().unwrap(),
        port: 0,
        jwt_secret: SecretString::from(JWT_SECRET),
        upload_dir: PathBuf::from("target/test-uploads"),
    };

    // Lazy pool: no connection is made until a query runs
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unreachable")
        .unwrap();

    Router::new()
        .nest("/api", routes::api_routes())
        .with_state(AppState::new(config, pool))
}

fn token_for(user_id: i32, role: Role) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: (now + Duration::days(1)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn orders_require_a_token() {
    let response = test_app()
        .oneshot(get_request("/api/orders/me", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let response = test_app()
        .oneshot(get_request("/api/orders/me", Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/orders/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let token = token_for(5, Role::User);

    for uri in ["/api/admin/orders", "/api/admin/analytics", "/api/admin/ads"] {
        let response = test_app()
            .oneshot(get_request(uri, Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn admin_routes_reject_anonymous_callers() {
    let response = test_app()
        .oneshot(get_request("/api/admin/analytics", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_writes_require_admin() {
    let token = token_for(5, Role::User);
    let body = json!({
        "name": "Rainbow Cone",
        "description": "Vanilla scoop with rainbow sprinkles.",
        "price_cents": 8000,
        "image_url": "https://example.com/cone.jpg",
        "category_id": 1
    });

    let response = test_app()
        .oneshot(json_request("POST", "/api/products", Some(&token), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_cart_is_a_bad_request() {
    let token = token_for(5, Role::User);

    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/orders",
            Some(&token),
            json!({ "items": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_cart_preview_is_a_bad_request() {
    let token = token_for(5, Role::User);

    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/orders/preview",
            Some(&token),
            json!({ "items": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_create_validates_name() {
    let token = token_for(1, Role::Admin);
    let body = json!({
        "name": "   ",
        "description": "d",
        "price_cents": 8000,
        "image_url": "https://example.com/cone.jpg",
        "category_id": 1
    });

    let response = test_app()
        .oneshot(json_request("POST", "/api/products", Some(&token), body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_update_rejects_empty_patch() {
    let token = token_for(1, Role::Admin);

    let response = test_app()
        .oneshot(json_request("PUT", "/api/products/3", Some(&token), json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_validates_name() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "name": "", "email": "a@example.com", "password": "longenough" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_short_passwords() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "name": "Asha", "email": "a@example.com", "password": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_bad_emails() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "name": "Asha", "email": "not-an-email", "password": "longenough" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
