use serde::Deserialize;

use crate::utils::IsTransient;

// ============================================================================
// API Errors
// ============================================================================
//
// Failures are terminal to the user action that caused them. The one
// exception is the read retry policy, which consults `should_retry`.
//
// ============================================================================

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, timeout, TLS
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("api error status={status}: {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Api { status: u16, message: Option<String> },

    /// The backend answered 2xx with a body this client cannot read
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message fit for a toast or alert
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Network(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Server message contains `needle`, ignoring case
    pub fn message_contains(&self, needle: &str) -> bool {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => message.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }

    /// Build from a non-2xx response body
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Api {
            status,
            message: ErrorBody::parse_message(body),
        }
    }
}

impl IsTransient for ApiError {
    fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(error) => error.is_timeout() || error.is_connect(),
            ApiError::Api { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

/// Error body shape: `{ "message": string | string[], "error"?: string }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorBody {
    fn parse_message(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;

        let message = match parsed.message {
            Some(ErrorMessage::One(message)) => Some(message),
            Some(ErrorMessage::Many(messages)) if !messages.is_empty() => Some(messages.join("; ")),
            _ => None,
        };

        message
            .or(parsed.error)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message_body() {
        let error = ApiError::from_response(400, r#"{"statusCode":400,"message":"Insufficient stock"}"#);
        assert_eq!(error.user_message(), "Insufficient stock");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn test_message_list_body() {
        let error = ApiError::from_response(
            422,
            r#"{"message":["quantity must be positive","variantId should not be empty"],"error":"Unprocessable Entity"}"#,
        );
        assert_eq!(
            error.user_message(),
            "quantity must be positive; variantId should not be empty"
        );
    }

    #[test]
    fn test_error_field_fallback() {
        let error = ApiError::from_response(404, r#"{"error":"Not Found"}"#);
        assert_eq!(error.user_message(), "Not Found");
    }

    #[test]
    fn test_unreadable_body_uses_generic_message() {
        let error = ApiError::from_response(500, "<html>gateway</html>");
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);

        let error = ApiError::from_response(500, r#"{"message":"   "}"#);
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);

        assert_eq!(
            ApiError::InvalidResponse("eof".to_string()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_message_contains_ignores_case() {
        let error = ApiError::from_response(500, r#"{"message":"Transaction already closed: timeout"}"#);
        assert!(error.message_contains("transaction already closed"));
        assert!(!error.message_contains("deadlock"));
    }

    #[test]
    fn test_gateway_statuses_are_transient() {
        assert!(ApiError::from_response(503, "").is_transient());
        assert!(!ApiError::from_response(500, "").is_transient());
        assert!(!ApiError::from_response(400, "").is_transient());
    }
}
