use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        menu::{CreatedResponse, MessageResponse},
        surplus::BroadcastRequest,
    },
    error::AppResult,
    extract::{ApiJson, ApiPath},
    middleware::auth::AuthUser,
    models::SurplusListing,
    services::surplus_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/broadcast", post(broadcast_surplus))
        .route("/active", get(list_active))
        .route("/{id}/claim", post(claim_surplus))
}

#[utoipa::path(
    post,
    path = "/api/surplus/broadcast",
    request_body = BroadcastRequest,
    responses(
        (status = 201, description = "Broadcast created", body = CreatedResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Surplus"
)]
pub async fn broadcast_surplus(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<BroadcastRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let resp = surplus_service::broadcast_surplus(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/surplus/active",
    responses(
        (status = 200, description = "Active broadcasts with owner details", body = Vec<SurplusListing>)
    ),
    tag = "Surplus"
)]
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<SurplusListing>>> {
    let listings = surplus_service::list_active(&state).await?;
    Ok(Json(listings))
}

#[utoipa::path(
    post,
    path = "/api/surplus/{id}/claim",
    params(("id" = i64, Path, description = "Broadcast ID")),
    responses(
        (status = 200, description = "Surplus claimed", body = MessageResponse),
        (status = 400, description = "Broadcast not available")
    ),
    security(("bearer_auth" = [])),
    tag = "Surplus"
)]
pub async fn claim_surplus(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    surplus_service::claim_surplus(&state, &user, id).await?;
    Ok(Json(MessageResponse::new("Surplus claimed successfully")))
}
