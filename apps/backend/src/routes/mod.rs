pub mod layout;
pub mod ocr;
pub mod parse;
pub mod table;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{ApiError, Result};

/// Decode base64 upload data, with or without a `data:...;base64,` prefix.
fn decode_upload(encoded: &str, what: &str) -> Result<Vec<u8>> {
    let data = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    STANDARD
        .decode(data.trim())
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 {}: {}", what, e)))
}
