//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flashdeck_core::LayoutError;
use serde::Serialize;
use thiserror::Error;

use crate::services::ocr::OcrError;
use crate::services::pdf::PdfError;
use crate::services::table::TableError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Layout(_) => (StatusCode::BAD_REQUEST, "layout_error"),
            ApiError::Ocr(OcrError::MissingApiKey | OcrError::UnsupportedImage) => {
                (StatusCode::BAD_REQUEST, "ocr_request_error")
            }
            ApiError::Ocr(_) => (StatusCode::BAD_GATEWAY, "ocr_error"),
            ApiError::Table(_) => (StatusCode::BAD_REQUEST, "table_error"),
            ApiError::Pdf(_) => (StatusCode::INTERNAL_SERVER_ERROR, "pdf_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
