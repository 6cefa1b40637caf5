//! Shared helpers for API integration tests: app construction, token
//! minting, request plumbing, and database seeding.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use hrflow_api::auth::jwt::{generate_token, JwtConfig};
use hrflow_api::config::ServerConfig;
use hrflow_api::routes;
use hrflow_api::state::AppState;
use hrflow_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Mint a bearer token for a test user, signed with the test secret.
pub fn token(user_id: DbId, org_id: DbId, role: &str, employee_id: Option<DbId>) -> String {
    generate_token(&test_config().jwt, user_id, org_id, role, employee_id).unwrap()
}

/// Perform an unauthenticated GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Perform a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Perform a POST request with a bearer token and a JSON body.
pub async fn post_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Perform a POST request with a bearer token and no body.
pub async fn post_auth_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Database seeding
// ---------------------------------------------------------------------------

/// Insert an organization, returning its id.
pub async fn seed_org(pool: &PgPool, name: &str) -> DbId {
    let row: (DbId,) = sqlx::query_as("INSERT INTO organizations (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

/// Insert an employee, returning their id.
pub async fn seed_employee(
    pool: &PgPool,
    org_id: DbId,
    full_name: &str,
    role: &str,
    manager_id: Option<DbId>,
) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO employees (organization_id, full_name, role, manager_id)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(org_id)
    .bind(full_name)
    .bind(role)
    .bind(manager_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

/// Insert a leave request entity row, returning its id.
pub async fn seed_leave(pool: &PgPool, org_id: DbId, employee_id: DbId) -> DbId {
    let row: (DbId,) = sqlx::query_as(
        "INSERT INTO leave_requests (organization_id, employee_id, starts_on, ends_on, reason)
         VALUES ($1, $2, '2026-09-01', '2026-09-05', 'vacation') RETURNING id",
    )
    .bind(org_id)
    .bind(employee_id)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}
