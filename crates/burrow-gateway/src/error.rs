use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Shortener(
                err @ (ShortenerError::InvalidUrl(_) | ShortenerError::InvalidShortCode(_)),
            ) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Shortener(ShortenerError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "short url not found".to_string())
            }
            AppError::Shortener(
                ShortenerError::CodeSpaceExhausted { .. } | ShortenerError::Storage(_),
            ) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
