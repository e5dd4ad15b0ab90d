mod common;

use axum::http::{Method, StatusCode};
use foodiq_api::routes::health::health_check;

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.status, "ok");
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let state = common::setup_state().await;
    let app = common::app(&state);

    let (status, body) = common::send(&app, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/api/nope");
}
