use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct DailyProduction {
    pub date: NaiveDate,
    pub total_prepared: i64,
    pub total_consumed: i64,
    pub total_surplus: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct ItemWastage {
    pub item_id: i64,
    pub dish_name: String,
    pub total_prepared: i64,
    pub total_consumed: i64,
    pub total_surplus: i64,
    /// `None` when nothing was prepared.
    pub waste_rate_percent: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct OverallStats {
    pub total_prepared: i64,
    pub total_consumed: i64,
    pub total_surplus: i64,
    pub avg_surplus_per_day: f64,
    pub avg_consumption_rate_percent: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, FromRow)]
pub struct RevenueStats {
    pub total_revenue: f64,
    pub total_orders: i64,
    pub avg_order_value: f64,
}
