use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp '{value}': expected RFC 3339")]
    InvalidTimestamp { value: String },

    #[error("Job '{id}' not found")]
    JobNotFound { id: String },

    #[error("Invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidTimestamp { .. } => StatusCode::BAD_REQUEST,
            AppError::JobNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Io(_) | AppError::Json(_) | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
