//! Maps core failures onto HTTP responses.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rj_core::error::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] AppError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(AppError::NotFound(..)) => StatusCode::NOT_FOUND,
            ApiError::Core(AppError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(AppError::Forbidden(_)) => StatusCode::FORBIDDEN,
            ApiError::Core(AppError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            ApiError::Core(AppError::Storage(_)) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            // Storage and template details stay in the log
            log::error!("{}", self);
            "Something went wrong".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(json!({ "message": message }))
    }
}
