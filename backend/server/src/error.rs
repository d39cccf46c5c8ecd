use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bank::{BankError, payloads::ErrorResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    #[error("Case files unavailable: {0}")]
    Bank(#[from] BankError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UnknownEndpoint { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidConfig { .. } | AppError::Bank { .. } | AppError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            status: "ERROR".to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
