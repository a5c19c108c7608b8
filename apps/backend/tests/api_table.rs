//! Table import API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::fixtures;
use common::TestContext;

const DECK_CSV: &str = "Term,Notes,Definition\n\
abhor,,\"to hate, detest\"\n\
,,\n\
mitosis,,cell division\n";

/// Test a CSV preview drops empty rows and columns.
#[tokio::test]
async fn test_table_csv_preview() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/table")
        .json(&fixtures::table_request("deck.csv", DECK_CSV.as_bytes()))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["columns"], json!(["Term", "Definition"]));
    assert_eq!(
        body["rows"],
        json!([["abhor", "to hate, detest"], ["mitosis", "cell division"]])
    );
    assert!(body.get("records").is_none());
}

/// Test mapping two TSV columns onto cards.
#[tokio::test]
async fn test_table_tsv_mapped_to_records() {
    let server = TestContext::new().server();

    let mut request = fixtures::table_request(
        "deck.TSV",
        b"Back\tFront\nSun and its planets\tSolar system\n\tOrphan\n",
    );
    request["front_column"] = json!("Front");
    request["back_column"] = json!("Back");

    let response = server.post("/api/table").json(&request).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["records"],
        json!([
            { "front": "Solar system", "back": "Sun and its planets" },
            { "front": "Orphan", "back": "" }
        ])
    );
    assert_eq!(body["warnings"], json!(["Row 2 has an empty Back field."]));
}

/// Test an unknown column is rejected.
#[tokio::test]
async fn test_table_unknown_column() {
    let server = TestContext::new().server();

    let mut request = fixtures::table_request("deck.csv", DECK_CSV.as_bytes());
    request["front_column"] = json!("Term");
    request["back_column"] = json!("Meaning");

    let response = server.post("/api/table").json(&request).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "table_error");
    assert_eq!(body["message"], "Table error: Column \"Meaning\" not found");
}

/// Test only one mapped column is a bad request.
#[tokio::test]
async fn test_table_half_mapping() {
    let server = TestContext::new().server();

    let mut request = fixtures::table_request("deck.csv", DECK_CSV.as_bytes());
    request["front_column"] = json!("Term");

    let response = server.post("/api/table").json(&request).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test unsupported extensions and broken workbooks.
#[tokio::test]
async fn test_table_rejects_bad_files() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/table")
        .json(&fixtures::table_request("deck.txt", b"a,b"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/table")
        .json(&fixtures::table_request("deck.xlsx", b"not a workbook"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "table_error");
}

/// Test invalid base64 content.
#[tokio::test]
async fn test_table_invalid_base64() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/table")
        .json(&json!({ "filename": "deck.csv", "content_base64": "%%%" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}
