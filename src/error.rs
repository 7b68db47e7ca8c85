use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{media::UploadError, response::ErrorResponse};

static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Include the underlying error source in 5xx responses. Set once at start-up.
pub fn set_expose_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Failed to upload image")]
    Upload(#[from] UploadError),

    #[error("Database error")]
    Store(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// `"Product not found"` style message for a well-formed but absent id.
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{entity} not found"))
    }

    pub fn invalid_id(entity: &str) -> Self {
        AppError::Validation(format!("Invalid {} ID", entity.to_lowercase()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upload(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn source_detail(&self) -> Option<String> {
        match self {
            AppError::Upload(err) => Some(err.to_string()),
            AppError::Store(err) => Some(err.to_string()),
            AppError::Internal(err) => Some(format!("{err:#}")),
            AppError::Validation(_) | AppError::NotFound(_) | AppError::PayloadTooLarge => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.source_detail();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                source = detail.as_deref().unwrap_or("-"),
                "request failed"
            );
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            detail: detail.filter(|_| EXPOSE_DETAILS.load(Ordering::Relaxed)),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
