use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::{
    dto::production::{DaysQuery, LogProductionRequest, LogProductionResponse},
    error::AppResult,
    extract::{ApiJson, ApiQuery},
    middleware::auth::AuthUser,
    models::ProductionRecord,
    services::production_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_production).post(log_production))
}

#[utoipa::path(
    post,
    path = "/api/production",
    request_body = LogProductionRequest,
    responses(
        (status = 201, description = "Production logged", body = LogProductionResponse),
        (status = 400, description = "Invalid production record")
    ),
    security(("bearer_auth" = [])),
    tag = "Production"
)]
pub async fn log_production(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<LogProductionRequest>,
) -> AppResult<(StatusCode, Json<LogProductionResponse>)> {
    let resp = production_service::log_production(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/production",
    params(DaysQuery),
    responses(
        (status = 200, description = "Recent production records", body = Vec<ProductionRecord>)
    ),
    security(("bearer_auth" = [])),
    tag = "Production"
)]
pub async fn list_production(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<DaysQuery>,
) -> AppResult<Json<Vec<ProductionRecord>>> {
    let records = production_service::list_production(&state, &user, query.days).await?;
    Ok(Json(records))
}
