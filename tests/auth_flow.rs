mod common;

use axum::http::{Method, StatusCode};
use foodiq_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    models::Role,
    services::auth_service,
};
use serde_json::json;

fn register_request(email: &str, role: Option<Role>) -> RegisterRequest {
    RegisterRequest {
        email: Some(email.to_string()),
        password: Some(common::PASSWORD.to_string()),
        role,
        name: Some("Canteen One".to_string()),
        location: None,
        phone: Some("9800000000".to_string()),
    }
}

#[tokio::test]
async fn duplicate_email_is_rejected_regardless_of_other_fields() -> anyhow::Result<()> {
    let state = common::setup_state().await;

    auth_service::register_user(&state, register_request("a@x.com", Some(Role::Operator)))
        .await?;

    let mut second = register_request("A@X.com ", Some(Role::Partner));
    second.name = Some("Someone Else".to_string());
    let err = auth_service::register_user(&state, second)
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(err, AppError::DuplicateIdentifier));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn registration_requires_all_mandatory_fields() {
    let state = common::setup_state().await;

    let err = auth_service::register_user(&state, register_request("b@x.com", None))
        .await
        .expect_err("role is required");
    match err {
        AppError::Validation(message) => assert!(message.contains("role")),
        other => panic!("unexpected error: {other:?}"),
    }

    let mut blank_name = register_request("c@x.com", Some(Role::Operator));
    blank_name.name = Some("   ".to_string());
    let err = auth_service::register_user(&state, blank_name)
        .await
        .expect_err("name is required");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn unknown_role_is_a_bad_request() {
    let state = common::setup_state().await;
    let app = common::app(&state);

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "d@x.com",
            "password": "pw",
            "role": "admin",
            "name": "D",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    common::register(&state, "e@x.com", Role::Operator).await;

    let wrong_password = auth_service::login_user(
        &state,
        LoginRequest {
            email: Some("e@x.com".into()),
            password: Some("not-the-password".into()),
        },
    )
    .await
    .expect_err("wrong password");
    let unknown_email = auth_service::login_user(
        &state,
        LoginRequest {
            email: Some("nobody@x.com".into()),
            password: Some(common::PASSWORD.into()),
        },
    )
    .await
    .expect_err("unknown email");

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());

    let app = common::app(&state);
    let (status_a, body_a) = common::send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "e@x.com", "password": "nope" })),
    )
    .await;
    let (status_b, body_b) = common::send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@x.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
    Ok(())
}

#[tokio::test]
async fn login_without_credentials_is_unauthorized() {
    let state = common::setup_state().await;
    let app = common::app(&state);

    let err = auth_service::login_user(
        &state,
        LoginRequest {
            email: Some("a@x.com".into()),
            password: None,
        },
    )
    .await
    .expect_err("password missing");
    assert!(matches!(err, AppError::InvalidCredentials));

    for body in [json!({}), json!({ "email": "a@x.com" }), json!({ "password": "pw" })] {
        let (status, resp) =
            common::send(&app, Method::POST, "/api/auth/login", None, Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(resp["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn login_returns_token_that_authenticates() -> anyhow::Result<()> {
    let state = common::setup_state().await;
    let app = common::app(&state);
    common::register_http(&app, "f@x.com", "canteen").await;

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "f@x.com", "password": common::PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "canteen");
    assert_eq!(body["name"], "f@x.com name");
    assert!(body["userId"].as_i64().is_some());

    let token = body["token"].as_str().unwrap();
    let claims = state.jwt.verify(token)?;
    assert_eq!(claims.email, "f@x.com");
    assert_eq!(claims.role, Role::Operator);
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);

    let (status, me) = common::send(&app, Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "f@x.com");
    assert!(me.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn missing_or_tampered_tokens_are_unauthenticated() {
    let state = common::setup_state().await;
    let app = common::app(&state);
    let token = common::register_http(&app, "g@x.com", "canteen").await;

    let (status, _) = common::send(&app, Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut tampered = token.clone();
    tampered.push('x');
    let (status, _) =
        common::send(&app, Method::GET, "/api/orders", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = foodiq_api::middleware::auth::JwtKeys::new(b"some-other-secret")
        .issue(1, "g@x.com", Role::Operator)
        .unwrap();
    let (status, _) = common::send(&app, Method::GET, "/api/orders", Some(&foreign), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn partners_cannot_use_operator_endpoints() {
    let state = common::setup_state().await;
    let app = common::app(&state);
    let token = common::register_http(&app, "h@x.com", "ngo").await;

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/api/menu",
        Some(&token),
        Some(json!({ "name": "Tea", "price": 10, "category": "breakfast" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
