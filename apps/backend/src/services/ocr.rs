//! OCR.space client for extracting text from screenshots.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("No OCR API key configured or provided")]
    MissingApiKey,
    #[error("Unsupported image format (expected PNG or JPEG)")]
    UnsupportedImage,
    #[error("Network error: {0}")]
    Network(String),
    #[error("OCR service returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("OCR failed: {0}")]
    Service(String),
    #[error("Unexpected OCR response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Image formats accepted for OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Sniff the format from the file signature.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// OCR.space client.
pub struct OcrService {
    client: Client,
    endpoint: String,
    language: String,
    default_key: Option<String>,
}

impl OcrService {
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let client = Client::builder().timeout(config.ocr_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.ocr_endpoint.clone(),
            language: config.ocr_language.clone(),
            default_key: config.ocr_api_key.clone(),
        })
    }

    /// Pick the request key, falling back to the configured one.
    pub fn resolve_key<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, OcrError> {
        requested
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_key.as_deref())
            .ok_or(OcrError::MissingApiKey)
    }

    /// Extract text from a PNG or JPEG image.
    pub async fn recognize(&self, image: &[u8], api_key: &str) -> Result<String, OcrError> {
        let kind = ImageKind::detect(image).ok_or(OcrError::UnsupportedImage)?;
        let payload = format!("data:{};base64,{}", kind.mime(), STANDARD.encode(image));

        let form = [
            ("apikey", api_key),
            ("language", self.language.as_str()),
            ("OCREngine", "2"),
            ("scale", "true"),
            ("base64Image", payload.as_str()),
        ];

        tracing::debug!("Sending {} byte {:?} image to OCR", image.len(), kind);

        let response = self.client.post(&self.endpoint).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OcrError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        interpret_response(&body)
    }
}

/// Turn an OCR.space response body into extracted text.
pub fn interpret_response(body: &Value) -> Result<String, OcrError> {
    if body["IsErroredOnProcessing"].as_bool().unwrap_or(false) {
        let message = error_message(&body["ErrorMessage"])
            .unwrap_or_else(|| "OCR processing error".to_string());
        return Err(OcrError::Service(message));
    }

    let results = body["ParsedResults"]
        .as_array()
        .ok_or_else(|| OcrError::InvalidResponse("missing ParsedResults".to_string()))?;

    let text = results
        .iter()
        .filter_map(|r| r["ParsedText"].as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(text)
}

/// `ErrorMessage` is either a string or a list of strings.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_image_kinds() {
        assert_eq!(ImageKind::detect(b"\x89PNG\r\n\x1a\nrest"), Some(ImageKind::Png));
        assert_eq!(ImageKind::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::detect(b"GIF89a"), None);
        assert_eq!(ImageKind::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_interpret_success_joins_pages() {
        let body = json!({
            "IsErroredOnProcessing": false,
            "ParsedResults": [
                { "ParsedText": "abhor (v.) : to hate" },
                { "ParsedText": "mitosis - cell division" }
            ]
        });
        assert_eq!(
            interpret_response(&body).unwrap(),
            "abhor (v.) : to hate\nmitosis - cell division"
        );
    }

    #[test]
    fn test_interpret_error_list() {
        let body = json!({
            "IsErroredOnProcessing": true,
            "ErrorMessage": ["File failed validation", "Bad image"]
        });
        let err = interpret_response(&body).unwrap_err();
        assert_eq!(err.to_string(), "OCR failed: File failed validation; Bad image");
    }

    #[test]
    fn test_interpret_error_string() {
        let body = json!({ "IsErroredOnProcessing": true, "ErrorMessage": "Invalid API key" });
        assert!(matches!(
            interpret_response(&body),
            Err(OcrError::Service(m)) if m == "Invalid API key"
        ));
    }

    #[test]
    fn test_interpret_missing_results() {
        let body = json!({ "IsErroredOnProcessing": false });
        assert!(matches!(
            interpret_response(&body),
            Err(OcrError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_resolve_key_prefers_request() {
        let config = Config {
            ocr_api_key: Some("server".to_string()),
            ..Config::default()
        };
        let service = OcrService::new(&config).unwrap();
        assert_eq!(service.resolve_key(Some("mine")).unwrap(), "mine");
        assert_eq!(service.resolve_key(Some("  ")).unwrap(), "server");
        assert_eq!(service.resolve_key(None).unwrap(), "server");
    }

    #[test]
    fn test_resolve_key_missing() {
        let service = OcrService::new(&Config::default()).unwrap();
        assert!(matches!(service.resolve_key(None), Err(OcrError::MissingApiKey)));
    }
}
