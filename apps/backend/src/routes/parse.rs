//! Free-text parsing, validation and export endpoints

use axum::{http::header, response::IntoResponse, Json};

use crate::error::Result;
use crate::models::*;

/// POST /api/parse
/// Parses pasted text into cards
pub async fn parse(Json(payload): Json<ParseRequest>) -> Result<Json<ParseResponse>> {
    let options = payload.options.unwrap_or_default();
    let result = flashdeck_core::parse_with(&payload.text, &options);

    tracing::info!(
        "Parsed {} bytes into {} cards ({} warnings)",
        payload.text.len(),
        result.records.len(),
        result.warnings.len()
    );

    Ok(Json(result.into()))
}

/// POST /api/validate
/// Re-checks cards after they were edited
pub async fn validate(Json(payload): Json<RecordsRequest>) -> Result<Json<ValidateResponse>> {
    let (card_count, sheet_count) = flashdeck_core::live_counts(&payload.records);

    Ok(Json(ValidateResponse {
        warnings: flashdeck_core::validate(&payload.records),
        invalid_rows: flashdeck_core::invalid_rows(&payload.records),
        card_count,
        sheet_count,
    }))
}

/// POST /api/export/tsv
/// Returns cards as tab-separated lines
pub async fn export_tsv(Json(payload): Json<RecordsRequest>) -> impl IntoResponse {
    let body = flashdeck_core::records_to_tsv(&payload.records);
    (
        [(header::CONTENT_TYPE, "text/tab-separated-values; charset=utf-8")],
        body,
    )
}
