use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Parsed out of the `multipart/form-data` body of `POST /api/food/add`.
#[derive(Debug)]
pub struct AddFoodForm {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub image_name: String,
    pub image_data: Vec<u8>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveFoodRequest {
    pub id: Uuid,
}
