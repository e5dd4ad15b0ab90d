use std::sync::OnceLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, Version,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use sea_orm::ActiveValue::NotSet;

use crate::{
    audit,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserProfile,
    state::AppState,
};

// Argon2id cost, fixed so every stored hash has the same work factor.
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<RegisterResponse> {
    let mut missing = Vec::new();
    let email = non_blank(payload.email, "email", &mut missing).map(|e| e.to_lowercase());
    let password = payload
        .password
        .filter(|p| !p.trim().is_empty())
        .or_else(|| {
            missing.push("password");
            None
        });
    let role = payload.role.or_else(|| {
        missing.push("role");
        None
    });
    let name = non_blank(payload.name, "name", &mut missing);

    let (Some(email), Some(password), Some(role), Some(name)) = (email, password, role, name)
    else {
        return Err(AppError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::DuplicateIdentifier);
    }

    let password_hash = hash_password(password).await?;

    let active = UserActive {
        id: NotSet,
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        name: Set(name),
        location: Set(blank_to_none(payload.location)),
        phone: Set(blank_to_none(payload.phone)),
        created_at: Set(Utc::now()),
    };

    // A concurrent registration can still win between the check and the insert.
    let user = match active.insert(&state.orm).await {
        Ok(user) => user,
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::DuplicateIdentifier);
        }
        Err(err) => return Err(err.into()),
    };

    let token = state.jwt.issue(user.id, &user.email, user.role)?;
    tracing::info!(user_id = user.id, role = user.role.as_str(), "user registered");

    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id, "role": user.role }),
    )
    .await;

    Ok(RegisterResponse {
        message: "User registered".into(),
        token,
        user_id: user.id,
        role: user.role,
    })
}

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::InvalidCredentials);
    };
    let email = email.trim().to_lowercase();

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;

    // Unknown emails are checked against a throwaway hash so both failure paths cost the same.
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let verified = verify_password(password, stored_hash).await?;

    let user = match user {
        Some(u) if verified => u,
        _ => return Err(AppError::InvalidCredentials),
    };

    let token = state.jwt.issue(user.id, &user.email, user.role)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(LoginResponse {
        token,
        user_id: user.id,
        role: user.role,
        name: user.name,
    })
}

pub async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<UserProfile> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(profile_from_entity(model))
}

fn hasher() -> AppResult<Argon2<'static>> {
    let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}

async fn verify_password(password: String, stored_hash: Option<String>) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || {
        let found = stored_hash.is_some();
        let stored_hash = stored_hash.unwrap_or_else(|| dummy_hash().to_string());
        let Ok(parsed_hash) = PasswordHash::new(&stored_hash) else {
            tracing::warn!("stored password hash is malformed");
            return Ok(false);
        };
        let matches = hasher()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();
        Ok(found && matches)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}

fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        let salt = SaltString::generate(&mut OsRng);
        hasher()
            .ok()
            .and_then(|a| a.hash_password(b"not-a-real-password", &salt).ok())
            .map(|hash| hash.to_string())
            .unwrap_or_default()
    })
}

fn non_blank(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn profile_from_entity(model: UserModel) -> UserProfile {
    UserProfile {
        id: model.id,
        email: model.email,
        role: model.role,
        name: model.name,
        location: model.location,
        phone: model.phone,
        created_at: model.created_at,
    }
}
