//! Test fixtures and factory functions for creating request bodies.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

/// Mixed-format paste covering every separator style.
pub const SAMPLE_PASTE: &str = "abhor (v.) : to hate, detest\n\
benevolent (adj.) : well meaning; kindly\n\
\n\
1) photosynthesis \u{2014} process by which plants make food\n\
- mitosis - cell division into two daughter cells\n\
Solar system\tSun and its planets\n";

/// Generate a colon-separated deck with `num_cards` cards.
pub fn sample_deck_text(num_cards: usize) -> String {
    (1..=num_cards)
        .map(|i| format!("term {}: definition {}", i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a records array from front/back pairs.
pub fn records(pairs: &[(&str, &str)]) -> serde_json::Value {
    json!(pairs
        .iter()
        .map(|(front, back)| json!({ "front": front, "back": back }))
        .collect::<Vec<_>>())
}

/// Create a parse request body.
pub fn parse_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Create a validate or export request body.
pub fn records_request(pairs: &[(&str, &str)]) -> serde_json::Value {
    json!({ "records": records(pairs) })
}

/// Create a layout request body.
pub fn layout_request(pairs: &[(&str, &str)], config: serde_json::Value) -> serde_json::Value {
    json!({ "records": records(pairs), "config": config })
}

/// Smallest byte string recognised as a PNG.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(b"not really pixels");
    bytes
}

/// Create an OCR request body from raw image bytes.
pub fn ocr_request(image: &[u8], api_key: Option<&str>) -> serde_json::Value {
    let mut body = json!({ "image_base64": STANDARD.encode(image) });
    if let Some(key) = api_key {
        body["api_key"] = json!(key);
    }
    body
}

/// Create a table import request body from raw file bytes.
pub fn table_request(filename: &str, content: &[u8]) -> serde_json::Value {
    json!({ "filename": filename, "content_base64": STANDARD.encode(content) })
}
