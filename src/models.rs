use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::entity::enums::{BroadcastStatus, MealPeriod, PaymentMode, Role};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: i64,
    pub operator_id: i64,
    pub name: String,
    pub price: f64,
    pub category: MealPeriod,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub operator_id: i64,
    pub total_amount: f64,
    pub payment_mode: PaymentMode,
    pub is_complimentary: bool,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductionRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub item_id: i64,
    pub shift: MealPeriod,
    pub quantity_prepared: i64,
    pub quantity_consumed: i64,
    pub quantity_surplus: i64,
    pub created_at: DateTime<Utc>,
}

/// An active broadcast together with the display fields of its operator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SurplusListing {
    pub id: i64,
    pub operator_id: i64,
    pub item_name: String,
    pub category: String,
    pub quantity: String,
    pub pickup_window: Option<String>,
    pub status: BroadcastStatus,
    pub created_at: DateTime<Utc>,
    pub owner_name: Option<String>,
    pub owner_location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NgoPartner {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub needs: Option<String>,
}
