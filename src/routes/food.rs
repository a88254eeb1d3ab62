use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};

use crate::{
    dto::food::{AddFoodForm, RemoveFoodRequest},
    error::{AppError, AppResult},
    models::FoodItem,
    response::ApiResponse,
    services::food_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_food))
        .route("/list", get(list_food))
        .route("/remove", post(remove_food))
}

#[utoipa::path(
    post,
    path = "/api/food/add",
    responses(
        (status = 200, description = "Add a food item", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Food"
)]
pub async fn add_food(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<ApiResponse<()>> {
    let result = async {
        let form = parse_add_food_form(multipart).await?;
        food_service::add_food(&state.pool, &state.upload_dir, form).await
    }
    .await;

    match result {
        Ok(item) => {
            tracing::info!(food_id = %item.id, "food item added");
            Json(ApiResponse::message("Food Added"))
        }
        Err(err @ (AppError::MissingInfo | AppError::BadRequest(_))) => {
            Json(ApiResponse::failure(err.to_string()))
        }
        Err(err) => {
            tracing::error!(error = %err, "food add failed");
            Json(ApiResponse::failure("Error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/food/list",
    responses(
        (status = 200, description = "List food items", body = ApiResponse<Vec<FoodItem>>)
    ),
    tag = "Food"
)]
pub async fn list_food(State(state): State<AppState>) -> Json<ApiResponse<Vec<FoodItem>>> {
    match food_service::list_food(&state.pool).await {
        Ok(items) => Json(ApiResponse::data(items)),
        Err(err) => {
            tracing::error!(error = %err, "food list failed");
            Json(ApiResponse::failure("Error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/food/remove",
    request_body = RemoveFoodRequest,
    responses(
        (status = 200, description = "Remove a food item", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Food"
)]
pub async fn remove_food(
    State(state): State<AppState>,
    Json(payload): Json<RemoveFoodRequest>,
) -> Json<ApiResponse<()>> {
    match food_service::remove_food(&state.pool, &state.upload_dir, payload.id).await {
        Ok(()) => Json(ApiResponse::message("Food removed")),
        Err(AppError::BadRequest(message)) => Json(ApiResponse::failure(message)),
        Err(err) => {
            tracing::error!(error = %err, "food remove failed");
            Json(ApiResponse::failure("Error"))
        }
    }
}

async fn parse_add_food_form(mut multipart: Multipart) -> AppResult<AddFoodForm> {
    let mut name = None;
    let mut description = None;
    let mut price = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "price" => {
                let raw = read_text(field).await?;
                let parsed = raw
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest("Invalid price".to_string()))?;
                price = Some(parsed);
            }
            "category" => category = Some(read_text(field).await?),
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::BadRequest(err.to_string()))?;
                image = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(name), Some(description), Some(price), Some(category), Some((image_name, image_data))) =
        (name, description, price, category, image)
    else {
        return Err(AppError::MissingInfo);
    };

    Ok(AddFoodForm {
        name,
        description,
        price,
        category,
        image_name,
        image_data,
    })
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))
}
