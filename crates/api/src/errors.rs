use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid multipart request: {0}")]
    InvalidMultipart(String),

    #[error("Missing {0}")]
    MissingConfig(&'static str),

    #[error("Upload failed")]
    UploadFailed { details: Option<String> },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "No file uploaded".to_string(),
                    details: None,
                },
            ),
            ApiError::InvalidMultipart(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            ApiError::MissingConfig(setting) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: format!("Missing {}", setting),
                    details: None,
                },
            ),
            ApiError::UploadFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Upload failed".to_string(),
                    details,
                },
            ),
            ApiError::InvalidPath(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Resource not found".to_string(),
                    details: None,
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}
