use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BroadcastRequest {
    pub item_name: String,
    pub category: String,
    /// Free text, e.g. "20 plates".
    pub quantity: String,
    pub pickup_window: Option<String>,
}
