//! Error types for Cancha server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    NoSuchCenter = 3,
    NoSuchCourt = 4,
    NoSuchReservation = 5,
    BadValue = 6,
    SlotConflict = 7,
    InvalidTimeFormat = 8,
    OverrideOutOfBounds = 10,
    PricingUnavailable = 11,
    GatewayFailure = 12,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing entity; the code says which kind so clients can tell a
    /// missing center from a missing court or reservation
    #[error("Not found: {1}")]
    NotFound(ErrorCode, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time format: {0}")]
    TimeFormat(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Override rejected: {0}")]
    OverrideRejected(String),

    #[error("Could not compute price: {0}")]
    PricingUnavailable(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(code, msg) => (StatusCode::NOT_FOUND, *code, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::TimeFormat(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidTimeFormat, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::SlotConflict, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::OverrideRejected(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::OverrideOutOfBounds, msg.clone())
            }
            AppError::PricingUnavailable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::PricingUnavailable, msg.clone())
            }
            AppError::Gateway(msg) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::GatewayFailure, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_carries_entity_code() {
        let cases = [
            (ErrorCode::NoSuchCenter, "Center x not found"),
            (ErrorCode::NoSuchCourt, "Court x not found"),
            (ErrorCode::NoSuchReservation, "Reservation x not found"),
        ];
        for (code, message) in cases {
            let response = AppError::NotFound(code, message.to_string()).into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["code"], code as u32);
            assert_eq!(body["error"], format!("{:?}", code));
        }
    }
}
