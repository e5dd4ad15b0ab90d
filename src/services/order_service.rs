use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, CreateOrderResponse},
    entity::{
        menu_items::{Column as MenuCol, Entity as MenuItems},
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_operator},
    models::{Order, OrderLine},
    state::AppState,
};

/// Number of orders returned by the listing endpoint.
pub const RECENT_ORDER_LIMIT: u64 = 50;

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<CreateOrderResponse> {
    ensure_operator(user)?;

    if let Some(line) = payload.items.iter().find(|line| line.quantity <= 0) {
        return Err(AppError::validation(format!(
            "Quantity for menu item {} must be positive",
            line.menu_item_id
        )));
    }
    if payload.items.is_empty() {
        match payload.total_amount {
            Some(total) if total.is_finite() && total >= 0.0 => {}
            _ => {
                return Err(AppError::validation(
                    "total_amount is required for an order without items",
                ));
            }
        }
    }

    // Dropping `txn` on any early return rolls the whole order back.
    let txn = state.orm.begin().await?;

    let mut ids: Vec<i64> = payload.items.iter().map(|line| line.menu_item_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let prices: HashMap<i64, f64> = if ids.is_empty() {
        HashMap::new()
    } else {
        MenuItems::find()
            .filter(
                Condition::all()
                    .add(MenuCol::Id.is_in(ids.clone()))
                    .add(MenuCol::OperatorId.eq(user.user_id))
                    .add(MenuCol::IsActive.eq(true)),
            )
            .all(&txn)
            .await?
            .into_iter()
            .map(|item| (item.id, item.price))
            .collect()
    };

    if let Some(missing) = ids.iter().find(|id| !prices.contains_key(id)) {
        return Err(AppError::validation(format!(
            "Menu item {missing} is not available"
        )));
    }

    let total_amount = if payload.items.is_empty() {
        payload.total_amount.unwrap_or_default()
    } else {
        payload
            .items
            .iter()
            .map(|line| prices[&line.menu_item_id] * line.quantity as f64)
            .sum()
    };
    if let Some(claimed) = payload.total_amount {
        if !payload.items.is_empty() && (claimed - total_amount).abs() > 0.005 {
            tracing::debug!(claimed, total_amount, "client total differs from catalog total");
        }
    }

    let order_number = build_order_number(Uuid::new_v4());

    let order = OrderActive {
        id: NotSet,
        order_number: Set(order_number),
        operator_id: Set(user.user_id),
        total_amount: Set(total_amount),
        payment_mode: Set(payload.payment_mode),
        is_complimentary: Set(payload.is_complimentary),
        created_at: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;

    for line in &payload.items {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            menu_item_id: Set(line.menu_item_id),
            quantity: Set(line.quantity),
            unit_price: Set(prices[&line.menu_item_id]),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        lines = payload.items.len(),
        "order created"
    );

    audit::record(
        &state.pool,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "order_number": order.order_number }),
    )
    .await;

    Ok(CreateOrderResponse {
        order_id: order.id,
        order_number: order.order_number,
        total_amount: order.total_amount,
        message: "Order created".into(),
    })
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<Order>> {
    ensure_operator(user)?;

    let orders = Orders::find()
        .filter(OrderCol::OperatorId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .order_by_desc(OrderCol::Id)
        .limit(RECENT_ORDER_LIMIT)
        .all(&state.orm)
        .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut lines_by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
    for line in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?
    {
        lines_by_order
            .entry(line.order_id)
            .or_default()
            .push(order_line_from_entity(line));
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = lines_by_order.remove(&order.id).unwrap_or_default();
            order_from_entity(order, items)
        })
        .collect())
}

pub async fn get_order(state: &AppState, user: &AuthUser, id: i64) -> AppResult<Order> {
    ensure_operator(user)?;

    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::OperatorId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_line_from_entity)
        .collect();

    Ok(order_from_entity(order, items))
}

fn order_from_entity(model: OrderModel, items: Vec<OrderLine>) -> Order {
    Order {
        id: model.id,
        order_number: model.order_number,
        operator_id: model.operator_id,
        total_amount: model.total_amount,
        payment_mode: model.payment_mode,
        is_complimentary: model.is_complimentary,
        created_at: model.created_at,
        items,
    }
}

fn order_line_from_entity(model: OrderItemModel) -> OrderLine {
    OrderLine {
        id: model.id,
        menu_item_id: model.menu_item_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
    }
}

/// `ORD-<utc timestamp>-<8 hex chars>`; the random suffix keeps same-second orders distinct.
pub fn build_order_number(entropy: Uuid) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = entropy.simple().to_string();
    format!("ORD-{}-{}", stamp, &suffix[..8]).to_uppercase()
}
