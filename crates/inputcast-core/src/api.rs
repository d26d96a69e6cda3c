//! The uniform result envelope returned by every command and remote call.
//!
//! Every API response body — success or failure — is an [`ApiResult<T>`].
//! Transport-level failures (no response at all) are the only errors reported
//! outside this shape; see the client crate's proxy error type.
//!
//! # Invariant
//!
//! `success == false` implies `error_message` is `Some` and `content` is
//! either `None` or a safe default (e.g. an empty list). Consumers must
//! branch on `success`, not on content nullness.

use serde::{Deserialize, Serialize};

/// Wraps a command or remote-call outcome with a success flag, a
/// human-readable message, and optional error detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    /// The payload. Absent or a safe default when `success` is `false`.
    pub content: Option<T>,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Short human-readable status message.
    pub message: String,
    /// Underlying error detail; always set when `success` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> ApiResult<T> {
    /// Builds a success envelope with the default `"Ok"` message.
    pub fn ok(content: T) -> Self {
        Self::ok_with_message(content, "Ok")
    }

    /// Builds a success envelope with a custom message.
    pub fn ok_with_message(content: T, message: impl Into<String>) -> Self {
        Self {
            content: Some(content),
            success: true,
            message: message.into(),
            error_message: None,
        }
    }

    /// Builds a failure envelope with no content.
    pub fn fail(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            content: None,
            success: false,
            message: message.into(),
            error_message: Some(error.into()),
        }
    }

    /// Builds a failure envelope that still carries a safe-default payload
    /// (e.g. an empty list for a listing command).
    pub fn fail_with_content(
        content: T,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            content: Some(content),
            success: false,
            message: message.into(),
            error_message: Some(error.into()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_sets_success_and_content() {
        // Arrange / Act
        let result = ApiResult::ok(vec!["demo".to_string()]);

        // Assert
        assert!(result.success);
        assert_eq!(result.content, Some(vec!["demo".to_string()]));
        assert_eq!(result.message, "Ok");
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_fail_sets_error_message_and_clears_content() {
        // Arrange / Act
        let result: ApiResult<String> = ApiResult::fail("Fail", "boom");

        // Assert — the envelope invariant: failure always carries detail
        assert!(!result.success);
        assert!(result.content.is_none());
        assert_eq!(result.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_fail_with_content_keeps_safe_default() {
        let result = ApiResult::fail_with_content(Vec::<String>::new(), "Fail", "boom");
        assert!(!result.success);
        assert_eq!(result.content, Some(Vec::new()));
        assert!(result.error_message.is_some());
    }

    #[test]
    fn test_serializes_with_camel_case_field_names() {
        // Arrange
        let result: ApiResult<String> = ApiResult::fail("Fail", "detail");

        // Act
        let json = serde_json::to_string(&result).expect("serialize");

        // Assert
        assert!(json.contains("\"errorMessage\""));
        assert!(json.contains("\"success\":false"));
    }

    #[test]
    fn test_error_message_omitted_from_json_when_absent() {
        let result = ApiResult::ok("OK".to_string());
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(!json.contains("errorMessage"));
    }

    #[test]
    fn test_round_trips_through_json() {
        // Arrange
        let original = ApiResult::ok(vec!["a".to_string(), "b".to_string()]);

        // Act
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: ApiResult<Vec<String>> = serde_json::from_str(&json).expect("deserialize");

        // Assert
        assert_eq!(original, restored);
    }
}
