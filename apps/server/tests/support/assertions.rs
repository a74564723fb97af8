use anyhow::Context as _;
use axum::http::{header, HeaderMap, StatusCode};
use serde_json::Value;

/// Assert status code matches expected
pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected status {expected}, got {actual}"
    );
}

/// Assert the response carries the FHIR JSON media type
pub fn assert_fhir_json(headers: &HeaderMap) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        content_type.starts_with("application/fhir+json"),
        "expected application/fhir+json, got {content_type}"
    );
}

/// Assert an OperationOutcome with one issue of the given code
pub fn assert_operation_outcome(value: &Value, issue_code: &str) {
    assert_eq!(
        value.get("resourceType").and_then(|v| v.as_str()),
        Some("OperationOutcome"),
        "expected OperationOutcome resource type"
    );
    assert_eq!(
        value["issue"][0]["code"].as_str(),
        Some(issue_code),
        "expected issue code {issue_code}"
    );
}

/// Get Bundle entries as array
pub fn get_bundle_entries(bundle: &Value) -> anyhow::Result<&Vec<Value>> {
    bundle
        .get("entry")
        .and_then(|v| v.as_array())
        .context("Bundle.entry is array")
}
