use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::MealPeriod;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogProductionRequest {
    pub date: NaiveDate,
    pub item_id: i64,
    pub quantity_prepared: i64,
    pub quantity_consumed: i64,
    pub shift: MealPeriod,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogProductionResponse {
    pub id: i64,
    pub quantity_surplus: i64,
    pub message: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DaysQuery {
    /// Size of the trailing window in days.
    pub days: Option<i64>,
}
