#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use foodiq_api::{
    db::{create_pool, run_migrations},
    dto::auth::RegisterRequest,
    middleware::auth::{AuthUser, JwtKeys},
    models::Role,
    routes::create_app,
    services::auth_service,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret-pass";

/// Fresh in-memory database with the schema applied.
pub async fn setup_state() -> AppState {
    let pool = create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    AppState::new(pool, JwtKeys::new(b"test-signing-secret"))
}

/// File-backed database with several pooled connections, for tests that need
/// real contention between writers. Remove the returned path when done.
pub async fn setup_file_state(max_connections: u32) -> (AppState, PathBuf) {
    let path = std::env::temp_dir().join(format!("foodiq-test-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    let pool = create_pool(&url, max_connections)
        .await
        .expect("file pool");
    run_migrations(&pool).await.expect("migrations");
    (
        AppState::new(pool, JwtKeys::new(b"test-signing-secret")),
        path,
    )
}

pub async fn remove_database(state: AppState, path: PathBuf) {
    state.pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub async fn register(state: &AppState, email: &str, role: Role) -> AuthUser {
    let resp = auth_service::register_user(
        state,
        RegisterRequest {
            email: Some(email.to_string()),
            password: Some(PASSWORD.to_string()),
            role: Some(role),
            name: Some(format!("{email} name")),
            location: Some("Pune".to_string()),
            phone: None,
        },
    )
    .await
    .expect("registration");

    AuthUser {
        user_id: resp.user_id,
        email: email.to_string(),
        role: resp.role,
    }
}

/// Send one request through the full router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn app(state: &AppState) -> Router {
    create_app(state.clone())
}

/// Register through HTTP and return the issued token.
pub async fn register_http(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": PASSWORD,
            "role": role,
            "name": format!("{email} name"),
            "location": "Pune",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().expect("token").to_string()
}
