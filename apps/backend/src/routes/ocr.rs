//! Screenshot OCR endpoint

use axum::{extract::State, Json};

use super::decode_upload;
use crate::error::Result;
use crate::models::{OcrRequest, OcrResponse, ParseResponse};
use crate::AppState;

/// POST /api/ocr
/// Extracts text from an image and parses it into cards
pub async fn recognize(
    State(state): State<AppState>,
    Json(payload): Json<OcrRequest>,
) -> Result<Json<OcrResponse>> {
    let image = decode_upload(&payload.image_base64, "image")?;
    let api_key = state.ocr.resolve_key(payload.api_key.as_deref())?;

    let text = state.ocr.recognize(&image, api_key).await?;

    let options = payload.options.unwrap_or_default();
    let parsed: ParseResponse = flashdeck_core::parse_with(&text, &options).into();

    tracing::info!(
        "OCR extracted {} chars, parsed {} cards",
        text.chars().count(),
        parsed.card_count
    );

    Ok(Json(OcrResponse::new(text, parsed)))
}
