//! Error handling for the application

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Pricing(e) => {
                let status = match &e {
                    // A catalog gap is a deploy problem, not a bad request.
                    PricingError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                if status.is_server_error() {
                    tracing::error!("Pricing configuration error: {}", e);
                }
                (status, Json(PricingErrorResponse::from(&e))).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = PricingErrorResponse {
                    error_type: "internal".to_string(),
                    message: "Internal error".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
