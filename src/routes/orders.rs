use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::orders::{
        PlaceOrderRequest, SessionUrlResponse, UpdateStatusRequest, UserOrdersRequest,
        VerifyOrderRequest,
    },
    error::{AppError, AppResult},
    models::Order,
    response::ApiResponse,
    services::order_service::{self, VerifyOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/place", post(place_order))
        .route("/verify", post(verify_order))
        .route("/userorders", post(user_orders))
        .route("/list", get(list_orders))
        .route("/status", post(update_status))
}

#[utoipa::path(
    post,
    path = "/api/order/place",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Checkout session created", body = SessionUrlResponse),
        (status = 400, description = "Validation failure"),
        (status = 402, description = "Payment rejected by the provider"),
        (status = 500, description = "Payment system or internal error"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<SessionUrlResponse>> {
    let session_url = order_service::place_order(&state, payload).await?;
    Ok(Json(SessionUrlResponse {
        success: true,
        session_url,
    }))
}

#[utoipa::path(
    post,
    path = "/api/order/verify",
    request_body = VerifyOrderRequest,
    responses(
        (status = 200, description = "Order finalized or discarded", body = ApiResponse<serde_json::Value>),
        (status = 402, description = "Provider did not confirm the payment"),
        (status = 404, description = "Unknown order"),
        (status = 500, description = "Update failed"),
    ),
    tag = "Orders"
)]
pub async fn verify_order(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOrderRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let outcome = match order_service::verify_order(&state, payload).await {
        Ok(outcome) => outcome,
        Err(err @ (AppError::NotFound | AppError::Payment(_))) => return Err(err),
        Err(err) => {
            tracing::error!(error = %err, "order verification failed");
            return Err(AppError::UpdateFailed);
        }
    };

    match outcome {
        VerifyOutcome::Paid => Ok(Json(ApiResponse::message("Paid"))),
        VerifyOutcome::NotPaid => Ok(Json(ApiResponse::failure("Not Paid"))),
        VerifyOutcome::NotConfirmed => Err(AppError::PaymentNotConfirmed),
    }
}

#[utoipa::path(
    post,
    path = "/api/order/userorders",
    request_body = UserOrdersRequest,
    responses(
        (status = 200, description = "Orders for one user", body = ApiResponse<Vec<Order>>)
    ),
    tag = "Orders"
)]
pub async fn user_orders(
    State(state): State<AppState>,
    Json(payload): Json<UserOrdersRequest>,
) -> Json<ApiResponse<Vec<Order>>> {
    match order_service::user_orders(&state, payload.user_id).await {
        Ok(orders) => Json(ApiResponse::data(orders)),
        Err(err) => {
            tracing::error!(error = %err, "user orders fetch failed");
            Json(ApiResponse::failure("Error fetching orders"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/order/list",
    responses(
        (status = 200, description = "All orders, for the admin panel", body = ApiResponse<Vec<Order>>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> Json<ApiResponse<Vec<Order>>> {
    match order_service::list_all_orders(&state).await {
        Ok(orders) => Json(ApiResponse::data(orders)),
        Err(err) => {
            tracing::error!(error = %err, "order list fetch failed");
            Json(ApiResponse::failure("Error fetching orders"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/order/status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order status overwritten", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Json<ApiResponse<()>> {
    match order_service::update_status(&state, payload).await {
        Ok(()) => Json(ApiResponse::message("Status Updated")),
        Err(err) => {
            tracing::error!(error = %err, "status update failed");
            Json(ApiResponse::failure("Error updating status"))
        }
    }
}
