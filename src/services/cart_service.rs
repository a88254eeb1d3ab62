use std::collections::HashMap;

use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
};

pub async fn add_to_cart(pool: &DbPool, user_id: Uuid, item_id: Uuid) -> AppResult<()> {
    let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM food_items WHERE id = $1")
        .bind(item_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(AppError::BadRequest("Food item not found".to_string()));
    }

    let mut cart = load_cart(pool, user_id).await?;
    *cart.entry(item_id).or_insert(0) += 1;
    store_cart(pool, user_id, &cart).await
}

pub async fn remove_from_cart(pool: &DbPool, user_id: Uuid, item_id: Uuid) -> AppResult<()> {
    let mut cart = load_cart(pool, user_id).await?;
    if let Some(quantity) = cart.get_mut(&item_id) {
        *quantity -= 1;
        if *quantity <= 0 {
            cart.remove(&item_id);
        }
    }
    store_cart(pool, user_id, &cart).await
}

pub async fn get_cart(pool: &DbPool, user_id: Uuid) -> AppResult<HashMap<Uuid, i64>> {
    load_cart(pool, user_id).await
}

async fn load_cart(pool: &DbPool, user_id: Uuid) -> AppResult<HashMap<Uuid, i64>> {
    let row: Option<(Json<HashMap<Uuid, i64>>,)> =
        sqlx::query_as("SELECT cart_data FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
    match row {
        Some((Json(cart),)) => Ok(cart),
        None => Err(AppError::NotFound),
    }
}

async fn store_cart(pool: &DbPool, user_id: Uuid, cart: &HashMap<Uuid, i64>) -> AppResult<()> {
    sqlx::query("UPDATE users SET cart_data = $2 WHERE id = $1")
        .bind(user_id)
        .bind(Json(cart))
        .execute(pool)
        .await?;
    Ok(())
}
