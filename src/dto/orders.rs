use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PaymentMode;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    #[serde(alias = "item_id")]
    pub menu_item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
    /// Required when `items` is empty; otherwise derived from the catalog.
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub is_complimentary: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub order_number: String,
    pub total_amount: f64,
    pub message: String,
}
