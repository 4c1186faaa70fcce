//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert a JSON error body with the given status
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert histogram JSON is internally consistent
pub fn assert_valid_histogram(json: &serde_json::Value) {
    let counts: Vec<u64> = json["counts"]
        .as_array()
        .expect("counts should be an array")
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect();

    assert_eq!(counts.len(), 256, "Expected 256 buckets");
    let total: u64 = counts.iter().sum();
    assert_eq!(json["total"].as_u64(), Some(total));
    assert_eq!(
        total,
        json["width"].as_u64().unwrap() * json["height"].as_u64().unwrap(),
        "Counts must sum to the pixel count"
    );
    assert_eq!(json["max"].as_u64(), counts.iter().copied().max());
    assert_eq!(
        json["occupied"].as_u64(),
        Some(counts.iter().filter(|&&c| c > 0).count() as u64)
    );
}
