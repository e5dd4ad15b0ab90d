use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::{
        production::DaysQuery,
        stats::{DailyProduction, ItemWastage, OverallStats, RevenueStats},
    },
    error::AppResult,
    extract::ApiQuery,
    middleware::auth::AuthUser,
    services::stats_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/production", get(production_stats))
        .route("/wastage-by-item", get(wastage_by_item))
        .route("/overall", get(overall_stats))
        .route("/revenue", get(revenue_stats))
}

#[utoipa::path(
    get,
    path = "/api/stats/production",
    params(DaysQuery),
    responses(
        (status = 200, description = "Daily production totals, newest first", body = Vec<DailyProduction>)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn production_stats(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<DaysQuery>,
) -> AppResult<Json<Vec<DailyProduction>>> {
    let rows = stats_service::production_stats(&state, &user, query.days).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/stats/wastage-by-item",
    responses(
        (status = 200, description = "Top 10 items by surplus", body = Vec<ItemWastage>)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn wastage_by_item(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ItemWastage>>> {
    let rows = stats_service::wastage_by_item(&state, &user).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/stats/overall",
    responses(
        (status = 200, description = "Lifetime production summary", body = OverallStats)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn overall_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<OverallStats>> {
    let stats = stats_service::overall_stats(&state, &user).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/stats/revenue",
    responses(
        (status = 200, description = "Revenue over the last 30 days", body = RevenueStats)
    ),
    security(("bearer_auth" = [])),
    tag = "Stats"
)]
pub async fn revenue_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<RevenueStats>> {
    let stats = stats_service::revenue_stats(&state, &user).await?;
    Ok(Json(stats))
}
