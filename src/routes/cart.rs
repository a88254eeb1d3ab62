use axum::{Json, Router, extract::State, response::{IntoResponse, Response}, routing::post};

use crate::{
    dto::cart::{CartDataResponse, CartItemRequest},
    error::AppError,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_to_cart))
        .route("/remove", post(remove_from_cart))
        .route("/get", post(get_cart))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Add one unit of an item to the cart", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CartItemRequest>,
) -> Json<ApiResponse<()>> {
    match cart_service::add_to_cart(&state.pool, user.user_id, payload.item_id).await {
        Ok(()) => Json(ApiResponse::message("Added to cart")),
        Err(AppError::BadRequest(message)) => Json(ApiResponse::failure(message)),
        Err(err) => {
            tracing::error!(error = %err, "cart add failed");
            Json(ApiResponse::failure("Error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/cart/remove",
    request_body = CartItemRequest,
    responses(
        (status = 200, description = "Remove one unit of an item from the cart", body = ApiResponse<serde_json::Value>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CartItemRequest>,
) -> Json<ApiResponse<()>> {
    match cart_service::remove_from_cart(&state.pool, user.user_id, payload.item_id).await {
        Ok(()) => Json(ApiResponse::message("Removed from cart")),
        Err(err) => {
            tracing::error!(error = %err, "cart remove failed");
            Json(ApiResponse::failure("Error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/cart/get",
    responses(
        (status = 200, description = "Current cart contents", body = CartDataResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(State(state): State<AppState>, user: AuthUser) -> Response {
    match cart_service::get_cart(&state.pool, user.user_id).await {
        Ok(cart_data) => Json(CartDataResponse {
            success: true,
            cart_data,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "cart fetch failed");
            Json(ApiResponse::<()>::failure("Error")).into_response()
        }
    }
}
