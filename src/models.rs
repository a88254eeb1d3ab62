use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Cart contents as a map from food-item id to quantity.
    #[schema(value_type = Object)]
    pub cart_data: Json<HashMap<Uuid, i64>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in major currency units.
    pub price: i64,
    pub category: String,
    /// Stored filename under the upload directory, served at `/images/{image}`.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItem {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = Vec<OrderLineItem>)]
    pub items: Json<Vec<OrderLineItem>>,
    pub amount: i64,
    #[schema(value_type = Object)]
    pub address: Json<serde_json::Value>,
    pub status: String,
    pub payment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_session_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
