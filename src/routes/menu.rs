use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::menu::{
        CreateMenuItemRequest, CreatedResponse, MenuQuery, MessageResponse, UpdateMenuItemRequest,
    },
    error::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::auth::AuthUser,
    models::MenuItem,
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu).post(create_menu_item))
        .route("/{id}", patch(update_menu_item).delete(deactivate_menu_item))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Active menu items", body = Vec<MenuItem>)
    ),
    tag = "Menu"
)]
pub async fn list_menu(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_service::list_menu(&state, query).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 201, description = "Menu item added", body = CreatedResponse),
        (status = 400, description = "Invalid menu item")
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateMenuItemRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let resp = menu_service::create_menu_item(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    patch,
    path = "/api/menu/{id}",
    params(("id" = i64, Path, description = "Menu item ID")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Updated menu item", body = MenuItem),
        (status = 404, description = "Menu item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateMenuItemRequest>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_service::update_menu_item(&state, &user, id, payload).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = i64, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item deactivated", body = MessageResponse),
        (status = 404, description = "Menu item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn deactivate_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    menu_service::deactivate_menu_item(&state, &user, id).await?;
    Ok(Json(MessageResponse::new("Menu item deactivated")))
}
