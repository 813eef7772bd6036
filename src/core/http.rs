//! HTTP utilities for talking to the roster backend

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;

/// Headers sent with every backend request.
pub fn default_header_map() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let agent = format!("roster-dash/{}", env!("CARGO_PKG_VERSION"));
    h.insert(USER_AGENT, HeaderValue::from_str(&agent)?);
    Ok(h)
}

/// FastAPI error bodies: `{"detail": "..."}`, sometimes `{"error": "...", "detail": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Best human-readable message for a failed response body.
pub fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.detail {
            Some(serde_json::Value::String(s)) => return s,
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
        if let Some(error) = parsed.error {
            return error;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
