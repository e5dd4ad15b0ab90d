use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    audit,
    dto::menu::{CreateMenuItemRequest, CreatedResponse, MenuQuery, UpdateMenuItemRequest},
    entity::menu_items::{ActiveModel, Column, Entity as MenuItems, Model as MenuItemModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_operator},
    models::MenuItem,
    state::AppState,
};

pub async fn list_menu(state: &AppState, query: MenuQuery) -> AppResult<Vec<MenuItem>> {
    let mut condition = Condition::all().add(Column::IsActive.eq(true));
    if let Some(category) = query.category {
        condition = condition.add(Column::Category.eq(category));
    }

    let items = MenuItems::find()
        .filter(condition)
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(menu_item_from_entity)
        .collect();

    Ok(items)
}

pub async fn create_menu_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuItemRequest,
) -> AppResult<CreatedResponse> {
    ensure_operator(user)?;
    let name = validate_name(&payload.name)?;
    validate_price(payload.price)?;

    let item = ActiveModel {
        id: NotSet,
        operator_id: Set(user.user_id),
        name: Set(name),
        price: Set(payload.price),
        category: Set(payload.category),
        is_active: Set(true),
        created_at: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_create",
        "menu_items",
        serde_json::json!({ "menu_item_id": item.id }),
    )
    .await;

    Ok(CreatedResponse {
        id: item.id,
        message: "Menu item added".into(),
    })
}

pub async fn update_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: i64,
    payload: UpdateMenuItemRequest,
) -> AppResult<MenuItem> {
    ensure_operator(user)?;
    if payload.name.is_none() && payload.price.is_none() && payload.category.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }
    let existing = find_owned(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(validate_name(&name)?);
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }

    let item = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_update",
        "menu_items",
        serde_json::json!({ "menu_item_id": item.id }),
    )
    .await;

    Ok(menu_item_from_entity(item))
}

/// Soft delete: the row stays so past orders and production records keep their reference.
pub async fn deactivate_menu_item(state: &AppState, user: &AuthUser, id: i64) -> AppResult<()> {
    ensure_operator(user)?;
    let existing = find_owned(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    active.is_active = Set(false);
    active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "menu_item_deactivate",
        "menu_items",
        serde_json::json!({ "menu_item_id": id }),
    )
    .await;

    Ok(())
}

async fn find_owned(state: &AppState, user: &AuthUser, id: i64) -> AppResult<MenuItemModel> {
    MenuItems::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(id))
                .add(Column::OperatorId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Menu item name is required"));
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price must be a non-negative number"));
    }
    Ok(())
}

fn menu_item_from_entity(model: MenuItemModel) -> MenuItem {
    MenuItem {
        id: model.id,
        operator_id: model.operator_id,
        name: model.name,
        price: model.price,
        category: model.category,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}
