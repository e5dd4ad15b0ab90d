use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

use crate::{
    audit,
    dto::production::{LogProductionRequest, LogProductionResponse},
    entity::{
        menu_items::{Column as MenuCol, Entity as MenuItems},
        production_records::{
            ActiveModel as ProductionActive, Column as ProductionCol, Entity as ProductionRecords,
            Model as ProductionModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_operator},
    models::ProductionRecord,
    state::AppState,
};

pub const MAX_WINDOW_DAYS: i64 = 3650;
const PRODUCTION_LIST_LIMIT: u64 = 100;

pub async fn log_production(
    state: &AppState,
    user: &AuthUser,
    payload: LogProductionRequest,
) -> AppResult<LogProductionResponse> {
    ensure_operator(user)?;

    if payload.quantity_prepared < 0 || payload.quantity_consumed < 0 {
        return Err(AppError::validation("Quantities must not be negative"));
    }

    let owned = MenuItems::find()
        .filter(
            Condition::all()
                .add(MenuCol::Id.eq(payload.item_id))
                .add(MenuCol::OperatorId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?;
    if owned.is_none() {
        return Err(AppError::validation(format!(
            "Menu item {} does not exist",
            payload.item_id
        )));
    }

    let quantity_surplus = surplus(payload.quantity_prepared, payload.quantity_consumed);
    if quantity_surplus < 0 {
        tracing::debug!(
            item_id = payload.item_id,
            quantity_surplus,
            "consumed exceeds prepared, recording negative surplus"
        );
    }

    let record = ProductionActive {
        id: NotSet,
        production_date: Set(payload.date),
        menu_item_id: Set(payload.item_id),
        operator_id: Set(user.user_id),
        shift: Set(payload.shift),
        quantity_prepared: Set(payload.quantity_prepared),
        quantity_consumed: Set(payload.quantity_consumed),
        quantity_surplus: Set(quantity_surplus),
        created_at: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "production_log",
        "production_records",
        serde_json::json!({ "production_id": record.id, "surplus": record.quantity_surplus }),
    )
    .await;

    Ok(LogProductionResponse {
        id: record.id,
        quantity_surplus: record.quantity_surplus,
        message: "Production logged".into(),
    })
}

pub async fn list_production(
    state: &AppState,
    user: &AuthUser,
    days: Option<i64>,
) -> AppResult<Vec<ProductionRecord>> {
    ensure_operator(user)?;

    let mut condition = Condition::all().add(ProductionCol::OperatorId.eq(user.user_id));
    if let Some(days) = days {
        condition = condition.add(ProductionCol::ProductionDate.gte(window_start(days)?));
    }

    let records = ProductionRecords::find()
        .filter(condition)
        .order_by_desc(ProductionCol::ProductionDate)
        .order_by_desc(ProductionCol::Id)
        .limit(PRODUCTION_LIST_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(production_from_entity)
        .collect();

    Ok(records)
}

/// Surplus is derived, never supplied by the caller.
pub fn surplus(prepared: i64, consumed: i64) -> i64 {
    prepared - consumed
}

/// First calendar day (UTC) of a trailing window of `days` days.
pub fn window_start(days: i64) -> AppResult<chrono::NaiveDate> {
    if !(0..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::validation(format!(
            "days must be between 0 and {MAX_WINDOW_DAYS}"
        )));
    }
    Ok(Utc::now().date_naive() - Duration::days(days))
}

fn production_from_entity(model: ProductionModel) -> ProductionRecord {
    ProductionRecord {
        id: model.id,
        date: model.production_date,
        item_id: model.menu_item_id,
        shift: model.shift,
        quantity_prepared: model.quantity_prepared,
        quantity_consumed: model.quantity_consumed,
        quantity_surplus: model.quantity_surplus,
        created_at: model.created_at,
    }
}
