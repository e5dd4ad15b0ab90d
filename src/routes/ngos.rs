use axum::{Json, Router, extract::State, routing::get};

use crate::{error::AppResult, models::NgoPartner, services::ngo_service, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_ngos))
}

#[utoipa::path(
    get,
    path = "/api/ngos",
    responses(
        (status = 200, description = "NGO partners", body = Vec<NgoPartner>)
    ),
    tag = "NGOs"
)]
pub async fn list_ngos(State(state): State<AppState>) -> AppResult<Json<Vec<NgoPartner>>> {
    let partners = ngo_service::list_ngos(&state).await?;
    Ok(Json(partners))
}
