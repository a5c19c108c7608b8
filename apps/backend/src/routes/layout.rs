//! Print layout endpoints

use axum::{http::header, response::IntoResponse, Json};

use crate::error::{ApiError, Result};
use crate::models::{LayoutRequest, LayoutResponse};
use crate::services::pdf::PdfRenderer;

/// POST /api/layout
/// Plans duplex sheets for the given cards
pub async fn plan(Json(payload): Json<LayoutRequest>) -> Result<Json<LayoutResponse>> {
    let sheets = flashdeck_core::plan_sheets(&payload.records, &payload.config)?;
    Ok(Json(LayoutResponse { sheets }))
}

/// POST /api/layout/pdf
/// Renders the cards as a printable duplex PDF
pub async fn pdf(Json(payload): Json<LayoutRequest>) -> Result<impl IntoResponse> {
    if payload.records.is_empty() {
        return Err(ApiError::BadRequest("No cards to print".to_string()));
    }

    let sheets = flashdeck_core::plan_sheets(&payload.records, &payload.config)?;
    let bytes = PdfRenderer::new().render(&sheets)?;

    tracing::info!(
        "Rendered {} cards on {} sheets ({} bytes)",
        payload.records.len(),
        sheets.len(),
        bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"flashcards.pdf\"",
            ),
        ],
        bytes,
    ))
}
