//! Explanation API payloads.
//!
//! Plain data shapes exchanged with the explanation service. Transport is
//! left to the caller; this module only builds request bodies and turns
//! response bodies into the markdown that gets rendered.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Response format requested from the service.
pub const MARKDOWN_FORMAT: &str = "markdown";

/// Request body sent to the explanation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub selected_code: String,
    pub context: String,
    pub format: String,
}

impl ExplanationRequest {
    /// Creates request asking for a markdown explanation.
    ///
    /// # Arguments
    ///
    /// * `selected_code`: Code the user selected
    /// * `context`: Surrounding source text sent alongside the selection
    pub fn new(selected_code: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            selected_code: selected_code.into(),
            context: context.into(),
            format: MARKDOWN_FORMAT.to_string(),
        }
    }

    /// Serializes request to its JSON body.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize explanation request")
    }
}

#[derive(Debug, Deserialize)]
struct ExplanationResponse {
    explanation: Option<serde_json::Value>,
}

/// Extracts the `explanation` field from a response body.
///
/// # Returns
///
/// The explanation text, or None when the body is empty, not a JSON object,
/// or has no scalar `explanation` field. Numbers and booleans are returned
/// as their JSON text.
pub fn extract_explanation(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    let response: ExplanationResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, "response body is not an explanation object");
            return None;
        }
    };

    match response.explanation? {
        serde_json::Value::String(text) => Some(text),
        scalar @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_)) => {
            Some(scalar.to_string())
        }
        other => {
            tracing::debug!(kind = json_kind(&other), "explanation field is not a scalar");
            None
        }
    }
}

/// Turns an HTTP status and body into the markdown shown to the user.
///
/// Failures become readable error text instead of errors so the viewer
/// always has something to render.
///
/// # Arguments
///
/// * `status`: HTTP status code
/// * `body`: Response body
pub fn explanation_from_response(status: u16, body: &str) -> String {
    if status != 200 {
        tracing::warn!(status, "explanation request failed");
        return format!(
            "Error: Failed to get explanation from API. Status code: {}\nResponse: {}",
            status, body
        );
    }

    extract_explanation(body).unwrap_or_else(|| {
        format!(
            "Error: Could not extract explanation from API response: {}",
            body
        )
    })
}

/// Formats a transport failure as the markdown shown to the user.
pub fn transport_error_message(error: impl std::fmt::Display) -> String {
    format!(
        "Error: Failed to get explanation from API. Exception: {}",
        error
    )
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serializes_camel_case() {
        // Arrange
        let request = ExplanationRequest::new("let x = 1;", "fn main() { let x = 1; }");

        // Act
        let json = request.to_json().expect("Should serialize");

        // Assert
        assert_eq!(
            json,
            r#"{"selectedCode":"let x = 1;","context":"fn main() { let x = 1; }","format":"markdown"}"#
        );
    }

    #[test]
    fn test_request_round_trips_through_serde() {
        let request = ExplanationRequest::new("a", "b");
        let json = request.to_json().expect("Should serialize");

        let parsed: ExplanationRequest = serde_json::from_str(&json).expect("Should parse");

        assert_eq!(parsed, request);
    }

    #[test]
    fn test_extract_explanation() {
        assert_eq!(
            extract_explanation(r##"{"explanation":"# Title"}"##),
            Some("# Title".to_string())
        );
    }

    #[test]
    fn test_extract_explanation_ignores_extra_fields() {
        assert_eq!(
            extract_explanation(r#"{"model":"x","explanation":"text","tokens":3}"#),
            Some("text".to_string())
        );
    }

    #[test]
    fn test_extract_explanation_stringifies_scalars() {
        assert_eq!(
            extract_explanation(r#"{"explanation":42}"#),
            Some("42".to_string())
        );
        assert_eq!(
            extract_explanation(r#"{"explanation":1.5}"#),
            Some("1.5".to_string())
        );
        assert_eq!(
            extract_explanation(r#"{"explanation":true}"#),
            Some("true".to_string())
        );
    }

    #[test]
    fn test_extract_explanation_missing_or_invalid() {
        assert_eq!(extract_explanation(""), None);
        assert_eq!(extract_explanation("not json"), None);
        assert_eq!(extract_explanation("[1, 2]"), None);
        assert_eq!(extract_explanation(r#"{"other":"x"}"#), None);
        assert_eq!(extract_explanation(r#"{"explanation":null}"#), None);
        assert_eq!(extract_explanation(r#"{"explanation":{"a":1}}"#), None);
    }

    #[test]
    fn test_explanation_from_ok_response() {
        assert_eq!(
            explanation_from_response(200, r#"{"explanation":"**ok**"}"#),
            "**ok**"
        );
    }

    #[test]
    fn test_explanation_from_ok_response_without_field() {
        assert_eq!(
            explanation_from_response(200, "{}"),
            "Error: Could not extract explanation from API response: {}"
        );
    }

    #[test]
    fn test_explanation_from_error_status() {
        assert_eq!(
            explanation_from_response(503, "busy"),
            "Error: Failed to get explanation from API. Status code: 503\nResponse: busy"
        );
    }

    #[test]
    fn test_transport_error_message() {
        assert_eq!(
            transport_error_message("connection refused"),
            "Error: Failed to get explanation from API. Exception: connection refused"
        );
    }
}
