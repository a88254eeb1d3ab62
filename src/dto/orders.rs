use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OrderLineItem;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub items: Vec<OrderLineItem>,
    pub amount: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub address: Option<serde_json::Value>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrderRequest {
    pub order_id: Uuid,
    /// Outcome flag forwarded by the redirected client; only the literal
    /// `"true"` counts as a success report.
    pub success: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOrdersRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: Uuid,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUrlResponse {
    pub success: bool,
    pub session_url: String,
}
