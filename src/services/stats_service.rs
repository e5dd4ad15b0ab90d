use chrono::{Duration, Utc};

use crate::{
    dto::stats::{DailyProduction, ItemWastage, OverallStats, RevenueStats},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_operator},
    services::production_service::window_start,
    state::AppState,
};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const REVENUE_WINDOW_DAYS: i64 = 30;
pub const WASTAGE_TOP_N: i64 = 10;

pub async fn production_stats(
    state: &AppState,
    user: &AuthUser,
    days: Option<i64>,
) -> AppResult<Vec<DailyProduction>> {
    ensure_operator(user)?;
    let since = window_start(days.unwrap_or(DEFAULT_WINDOW_DAYS))?;

    let rows = sqlx::query_as::<_, DailyProduction>(
        r#"
        SELECT
            production_date AS date,
            SUM(quantity_prepared) AS total_prepared,
            SUM(quantity_consumed) AS total_consumed,
            SUM(quantity_surplus) AS total_surplus
        FROM production_records
        WHERE operator_id = ? AND production_date >= ?
        GROUP BY production_date
        ORDER BY production_date DESC
        "#,
    )
    .bind(user.user_id)
    .bind(since)
    .fetch_all(&state.pool)
    .await?;

    Ok(rows)
}

/// Items ranked by total surplus, largest first. The waste rate is `NULL`
/// for items with nothing prepared rather than a division by zero.
pub async fn wastage_by_item(state: &AppState, user: &AuthUser) -> AppResult<Vec<ItemWastage>> {
    ensure_operator(user)?;

    let rows = sqlx::query_as::<_, ItemWastage>(
        r#"
        SELECT
            p.menu_item_id AS item_id,
            m.name AS dish_name,
            SUM(p.quantity_prepared) AS total_prepared,
            SUM(p.quantity_consumed) AS total_consumed,
            SUM(p.quantity_surplus) AS total_surplus,
            ROUND(SUM(p.quantity_surplus) * 100.0 / NULLIF(SUM(p.quantity_prepared), 0), 2)
                AS waste_rate_percent
        FROM production_records p
        JOIN menu_items m ON m.id = p.menu_item_id
        WHERE p.operator_id = ?
        GROUP BY p.menu_item_id, m.name
        ORDER BY total_surplus DESC, p.menu_item_id ASC
        LIMIT ?
        "#,
    )
    .bind(user.user_id)
    .bind(WASTAGE_TOP_N)
    .fetch_all(&state.pool)
    .await?;

    Ok(rows)
}

/// Lifetime totals. `avg_surplus_per_day` is the mean surplus per production
/// record; the consumption rate is not rounded.
pub async fn overall_stats(state: &AppState, user: &AuthUser) -> AppResult<OverallStats> {
    ensure_operator(user)?;

    let stats = sqlx::query_as::<_, OverallStats>(
        r#"
        SELECT
            COALESCE(SUM(quantity_prepared), 0) AS total_prepared,
            COALESCE(SUM(quantity_consumed), 0) AS total_consumed,
            COALESCE(SUM(quantity_surplus), 0) AS total_surplus,
            COALESCE(AVG(quantity_surplus), 0.0) AS avg_surplus_per_day,
            COALESCE(
                SUM(quantity_consumed) * 100.0 / NULLIF(SUM(quantity_prepared), 0),
                0.0
            ) AS avg_consumption_rate_percent
        FROM production_records
        WHERE operator_id = ?
        "#,
    )
    .bind(user.user_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(stats)
}

pub async fn revenue_stats(state: &AppState, user: &AuthUser) -> AppResult<RevenueStats> {
    ensure_operator(user)?;
    let since = Utc::now() - Duration::days(REVENUE_WINDOW_DAYS);

    let stats = sqlx::query_as::<_, RevenueStats>(
        r#"
        SELECT
            COALESCE(SUM(total_amount), 0.0) AS total_revenue,
            COUNT(*) AS total_orders,
            COALESCE(ROUND(AVG(total_amount), 2), 0.0) AS avg_order_value
        FROM orders
        WHERE operator_id = ? AND created_at >= ?
        "#,
    )
    .bind(user.user_id)
    .bind(since)
    .fetch_one(&state.pool)
    .await?;

    Ok(stats)
}
