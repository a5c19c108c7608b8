//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for building the router from an in-memory config
//! - A mock OCR.space server bound to a random local port

pub mod fixtures;

use std::collections::HashMap;

use axum::{routing::post, Form, Json, Router};
use axum_test::TestServer;
use serde_json::{json, Value};

use flashdeck_backend::config::Config;
use flashdeck_backend::{router, AppState};

/// API key accepted by the mock OCR server.
pub const MOCK_OCR_KEY: &str = "test-key";

/// Test context holding the router under test.
pub struct TestContext {
    pub config: Config,
}

impl TestContext {
    /// Create a context with default settings and no OCR key.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create a context whose OCR client talks to `endpoint`.
    pub fn with_ocr(endpoint: String, api_key: Option<&str>) -> Self {
        Self {
            config: Config {
                ocr_endpoint: endpoint,
                ocr_api_key: api_key.map(str::to_string),
                ..Config::default()
            },
        }
    }

    /// Get a test server for the router.
    pub fn server(&self) -> TestServer {
        let state = AppState::new(self.config.clone()).expect("Failed to build app state");
        TestServer::new(router(state)).expect("Failed to start test server")
    }
}

/// Spawn a fake OCR.space endpoint returning `text` for [`MOCK_OCR_KEY`].
///
/// Returns the endpoint URL.
pub async fn spawn_mock_ocr(text: &'static str) -> String {
    let app = Router::new().route(
        "/parse/image",
        post(move |Form(form): Form<HashMap<String, String>>| async move {
            let has_image = form
                .get("base64Image")
                .is_some_and(|img| img.starts_with("data:image/"));

            let body: Value = match form.get("apikey").map(String::as_str) {
                Some(MOCK_OCR_KEY) if has_image => json!({
                    "IsErroredOnProcessing": false,
                    "OCRExitCode": 1,
                    "ParsedResults": [{ "ParsedText": text, "FileParseExitCode": 1 }]
                }),
                Some(MOCK_OCR_KEY) => json!({
                    "IsErroredOnProcessing": true,
                    "ErrorMessage": ["Not a valid base64 image"]
                }),
                _ => json!({
                    "IsErroredOnProcessing": true,
                    "ErrorMessage": "The API key is invalid"
                }),
            };
            Json(body)
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock OCR listener");
    let addr = listener.local_addr().expect("Mock OCR listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock OCR server failed");
    });

    format!("http://{}/parse/image", addr)
}
