use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::{
    dto::auth::{LoginRequest, RegisterRequest, TokenResponse},
    error::AppError,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// Auth failures reply 200 with a success=false envelope; only the happy path
// carries a token.
fn token_or_envelope(result: Result<String, AppError>, action: &str) -> Response {
    match result {
        Ok(token) => Json(TokenResponse {
            success: true,
            token,
        })
        .into_response(),
        Err(AppError::BadRequest(message)) => {
            Json(ApiResponse::<()>::failure(message)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "{action} failed");
            Json(ApiResponse::<()>::failure("Error")).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register user", body = TokenResponse)
    ),
    tag = "User"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    token_or_envelope(
        auth_service::register_user(&state.pool, payload).await,
        "registration",
    )
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = TokenResponse)
    ),
    tag = "User"
)]
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    token_or_envelope(auth_service::login_user(&state.pool, payload).await, "login")
}
