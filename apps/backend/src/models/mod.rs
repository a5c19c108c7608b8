//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from flashdeck-core
pub use flashdeck_core::layout::{PrintConfig, SheetPlan};
pub use flashdeck_core::types::{CardRecord, ParseResult, ParserOptions};

// === Parse ===

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    #[serde(default)]
    pub options: Option<ParserOptions>,
}

/// Parsed cards with review-stage counts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub records: Vec<CardRecord>,
    pub warnings: Vec<String>,
    pub card_count: usize,
    pub sheet_count: usize,
}

impl From<ParseResult> for ParseResponse {
    fn from(result: ParseResult) -> Self {
        let (card_count, sheet_count) = flashdeck_core::live_counts(&result.records);
        Self {
            records: result.records,
            warnings: result.warnings,
            card_count,
            sheet_count,
        }
    }
}

// === Validate / Export ===

#[derive(Debug, Deserialize)]
pub struct RecordsRequest {
    pub records: Vec<CardRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub warnings: Vec<String>,
    /// 0-based indices of records with an empty side.
    pub invalid_rows: Vec<usize>,
    pub card_count: usize,
    pub sheet_count: usize,
}

// === Layout ===

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub records: Vec<CardRecord>,
    #[serde(default)]
    pub config: PrintConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub sheets: Vec<SheetPlan>,
}

// === OCR ===

#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    /// PNG or JPEG bytes, base64 encoded. A `data:` URL prefix is accepted.
    pub image_base64: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub options: Option<ParserOptions>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OcrResponse {
    /// Text exactly as returned by OCR.
    pub text: String,
    pub records: Vec<CardRecord>,
    pub warnings: Vec<String>,
    pub card_count: usize,
    pub sheet_count: usize,
}

impl OcrResponse {
    pub fn new(text: String, parsed: ParseResponse) -> Self {
        Self {
            text,
            records: parsed.records,
            warnings: parsed.warnings,
            card_count: parsed.card_count,
            sheet_count: parsed.sheet_count,
        }
    }
}

// === Table import ===

#[derive(Debug, Deserialize)]
pub struct TableRequest {
    /// Picks the reader: `.csv`, `.tsv` or `.xlsx`.
    pub filename: String,
    /// File bytes, base64 encoded. A `data:` URL prefix is accepted.
    pub content_base64: String,
    #[serde(default)]
    pub front_column: Option<String>,
    #[serde(default)]
    pub back_column: Option<String>,
}

/// Table preview; cards are included once both columns are chosen.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableResponse {
    pub columns: Vec<String>,
    /// One cell per column, in column order.
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<CardRecord>>,
    #[serde(default)]
    pub warnings: Vec<String>,
}
