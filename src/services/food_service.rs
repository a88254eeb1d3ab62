use std::path::Path;

use anyhow::Context;
use tokio::fs;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::food::AddFoodForm,
    error::{AppError, AppResult},
    models::FoodItem,
};

pub async fn add_food(pool: &DbPool, upload_dir: &Path, form: AddFoodForm) -> AppResult<FoodItem> {
    let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&form.image_name));

    fs::create_dir_all(upload_dir)
        .await
        .context("failed to create upload directory")?;
    fs::write(upload_dir.join(&stored_name), &form.image_data)
        .await
        .context("failed to store image")?;

    let item: FoodItem = sqlx::query_as(
        r#"
        INSERT INTO food_items (id, name, description, price, category, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(form.name)
    .bind(form.description)
    .bind(form.price)
    .bind(form.category)
    .bind(stored_name)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn list_food(pool: &DbPool) -> AppResult<Vec<FoodItem>> {
    let items = sqlx::query_as::<_, FoodItem>("SELECT * FROM food_items ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn remove_food(pool: &DbPool, upload_dir: &Path, id: Uuid) -> AppResult<()> {
    let item: Option<FoodItem> = sqlx::query_as("SELECT * FROM food_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let item = match item {
        Some(item) => item,
        None => return Err(AppError::BadRequest("Food item not found".to_string())),
    };

    // Image deletion is best-effort; the record goes away regardless.
    let path = upload_dir.join(&item.image);
    if let Err(err) = fs::remove_file(&path).await {
        tracing::warn!(error = %err, path = %path.display(), "failed to delete image file");
    }

    sqlx::query("DELETE FROM food_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
