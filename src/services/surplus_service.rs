use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    audit,
    dto::{menu::CreatedResponse, surplus::BroadcastRequest},
    entity::{
        surplus_broadcasts::{
            ActiveModel as BroadcastActive, Column as BroadcastCol, Entity as SurplusBroadcasts,
        },
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_operator, ensure_partner},
    models::{BroadcastStatus, SurplusListing},
    state::AppState,
};

pub async fn broadcast_surplus(
    state: &AppState,
    user: &AuthUser,
    payload: BroadcastRequest,
) -> AppResult<CreatedResponse> {
    ensure_operator(user)?;

    let item_name = required(&payload.item_name, "item_name")?;
    let category = required(&payload.category, "category")?;
    let quantity = required(&payload.quantity, "quantity")?;
    let pickup_window = payload
        .pickup_window
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty());

    let broadcast = BroadcastActive {
        id: NotSet,
        operator_id: Set(user.user_id),
        item_name: Set(item_name),
        category: Set(category),
        quantity: Set(quantity),
        pickup_window: Set(pickup_window),
        status: Set(BroadcastStatus::Active),
        claimed_by: Set(None),
        claimed_at: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(broadcast_id = broadcast.id, "surplus broadcast created");

    audit::record(
        &state.pool,
        Some(user.user_id),
        "surplus_broadcast",
        "surplus_broadcasts",
        serde_json::json!({ "broadcast_id": broadcast.id }),
    )
    .await;

    Ok(CreatedResponse {
        id: broadcast.id,
        message: "Broadcast created".into(),
    })
}

pub async fn list_active(state: &AppState) -> AppResult<Vec<SurplusListing>> {
    let rows = SurplusBroadcasts::find()
        .filter(BroadcastCol::Status.eq(BroadcastStatus::Active))
        .order_by_desc(BroadcastCol::CreatedAt)
        .order_by_desc(BroadcastCol::Id)
        .find_also_related(Users)
        .all(&state.orm)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(broadcast, owner)| SurplusListing {
            id: broadcast.id,
            operator_id: broadcast.operator_id,
            item_name: broadcast.item_name,
            category: broadcast.category,
            quantity: broadcast.quantity,
            pickup_window: broadcast.pickup_window,
            status: broadcast.status,
            created_at: broadcast.created_at,
            owner_name: owner.as_ref().map(|o| o.name.clone()),
            owner_location: owner.and_then(|o| o.location),
        })
        .collect())
}

/// Claim an active broadcast. The single conditional update is the whole
/// protocol: whichever claim the store applies first flips the status, every
/// later one matches zero rows.
pub async fn claim_surplus(state: &AppState, user: &AuthUser, id: i64) -> AppResult<()> {
    ensure_partner(user)?;

    let result = SurplusBroadcasts::update_many()
        .col_expr(BroadcastCol::Status, Expr::value(BroadcastStatus::Claimed))
        .col_expr(BroadcastCol::ClaimedBy, Expr::value(user.user_id))
        .col_expr(BroadcastCol::ClaimedAt, Expr::value(Utc::now()))
        .filter(BroadcastCol::Id.eq(id))
        .filter(BroadcastCol::Status.eq(BroadcastStatus::Active))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotAvailable);
    }

    tracing::info!(broadcast_id = id, claimer = user.user_id, "surplus claimed");

    audit::record(
        &state.pool,
        Some(user.user_id),
        "surplus_claim",
        "surplus_broadcasts",
        serde_json::json!({ "broadcast_id": id }),
    )
    .await;

    Ok(())
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
