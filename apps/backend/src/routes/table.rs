//! Spreadsheet import endpoint

use axum::Json;

use super::decode_upload;
use crate::error::{ApiError, Result};
use crate::models::{TableRequest, TableResponse};
use crate::services::table::load_table;

/// POST /api/table
/// Loads a CSV/TSV/XLSX file and optionally maps two columns onto cards
pub async fn import(Json(payload): Json<TableRequest>) -> Result<Json<TableResponse>> {
    let bytes = decode_upload(&payload.content_base64, "file")?;
    let table = load_table(&bytes, &payload.filename)?;

    let records = match (&payload.front_column, &payload.back_column) {
        (Some(front), Some(back)) => Some(table.records(front, back)?),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "front_column and back_column must be given together".to_string(),
            ))
        }
    };
    let warnings = records
        .as_deref()
        .map(flashdeck_core::validate)
        .unwrap_or_default();

    tracing::info!(
        "Loaded {} with {} rows and {} columns",
        payload.filename,
        table.rows.len(),
        table.columns.len()
    );

    Ok(Json(TableResponse {
        columns: table.columns,
        rows: table.rows,
        records,
        warnings,
    }))
}
