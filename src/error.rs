use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::payment::PaymentError;
use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing info")]
    MissingInfo,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Amount too low")]
    AmountTooLow,

    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Payment not confirmed")]
    PaymentNotConfirmed,

    #[error("Update failed")]
    UpdateFailed,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Internal Server Error")]
    Db(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingInfo | AppError::InvalidEmail | AppError::AmountTooLow => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::PaymentNotConfirmed => (StatusCode::PAYMENT_REQUIRED, self.to_string()),
            AppError::UpdateFailed => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Payment(err) => match err {
                PaymentError::CardDeclined => {
                    (StatusCode::PAYMENT_REQUIRED, "Card declined".to_string())
                }
                PaymentError::IncorrectCvc => (
                    StatusCode::PAYMENT_REQUIRED,
                    "Incorrect security code".to_string(),
                ),
                PaymentError::Connect(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Payment system error".to_string(),
                ),
                PaymentError::Api { .. } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                ),
            },
            AppError::Db(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = ApiResponse::<()>::failure(message);
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
