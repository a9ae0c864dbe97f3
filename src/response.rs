use std::collections::BTreeMap;

use serde::Serialize;

pub const PROCESSING_FAILED_BODY: &str = r#"{"error": "File processing failed"}"#;

const ALLOWED_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key";
const ALLOWED_METHODS: &str = "POST,OPTIONS";

/// Proxy-integration shaped result returned to the lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl Response {
    pub fn ok(body: String, allowed_origin: &str) -> Self {
        Self {
            status_code: 200,
            body,
            headers: headers(allowed_origin),
        }
    }

    /// Generic failure. Details of the fault only ever go to the logs.
    pub fn processing_failed(allowed_origin: &str) -> Self {
        Self {
            status_code: 500,
            body: PROCESSING_FAILED_BODY.to_string(),
            headers: headers(allowed_origin),
        }
    }
}

fn headers(allowed_origin: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), allowed_origin.to_string()),
        ("Access-Control-Allow-Headers".to_string(), ALLOWED_HEADERS.to_string()),
        ("Access-Control-Allow-Methods".to_string(), ALLOWED_METHODS.to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}
