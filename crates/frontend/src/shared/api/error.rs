//! Uniform API error shape.
//!
//! Every failed request is normalized into [`ApiError`] before it reaches a
//! composable: HTTP failures carry the server status and body, connectivity
//! failures use status `0`, request-construction failures use status `-1`.
//! Engines never see raw transport errors.

use std::collections::HashMap;
use std::fmt;

use contracts::api::{ApiErrorBody, Notification};

/// Network / connectivity failure (no response received).
pub const STATUS_NETWORK: i32 = 0;
/// The request could not be constructed or the response not decoded.
pub const STATUS_REQUEST_SETUP: i32 = -1;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub errors: HashMap<String, Vec<String>>,
    pub status: i32,
    pub notification: Option<Notification>,
}

/// Error taxonomy used to pick recovery behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 422 with per-field messages; rendered inline, no redirect.
    Validation,
    /// 401; forces logout and a redirect to login.
    Auth,
    /// 403; redirect to the unauthorized view.
    Permission,
    /// 404; on a form fetch this redirects to the resource index.
    NotFound,
    /// No response or timeout. Surfaced as a transient notification.
    Network,
    /// Client-side request construction or decoding failure.
    RequestSetup,
    Other,
}

impl ApiError {
    pub fn network() -> Self {
        Self {
            message: "Network error. Please check your internet connection.".to_string(),
            errors: HashMap::new(),
            status: STATUS_NETWORK,
            notification: None,
        }
    }

    pub fn request_setup(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: HashMap::new(),
            status: STATUS_REQUEST_SETUP,
            notification: None,
        }
    }

    /// Normalizes a non-2xx response. The HTTP status wins over whatever the
    /// body claims, since bodies are occasionally missing or stale.
    pub fn from_response(http_status: u16, body: ApiErrorBody) -> Self {
        Self {
            message: body
                .message
                .unwrap_or_else(|| "An API error occurred".to_string()),
            errors: body.errors.unwrap_or_default(),
            status: i32::from(http_status),
            notification: body.notification,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            STATUS_NETWORK => ApiErrorKind::Network,
            STATUS_REQUEST_SETUP => ApiErrorKind::RequestSetup,
            401 => ApiErrorKind::Auth,
            403 => ApiErrorKind::Permission,
            404 => ApiErrorKind::NotFound,
            422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Other,
        }
    }

    pub fn has_field_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_status_codes() {
        assert_eq!(ApiError::network().kind(), ApiErrorKind::Network);
        assert_eq!(
            ApiError::request_setup("bad url").kind(),
            ApiErrorKind::RequestSetup
        );
        let cases = [
            (401, ApiErrorKind::Auth),
            (403, ApiErrorKind::Permission),
            (404, ApiErrorKind::NotFound),
            (422, ApiErrorKind::Validation),
            (500, ApiErrorKind::Other),
        ];
        for (status, kind) in cases {
            let err = ApiError::from_response(status, ApiErrorBody::default());
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn from_response_falls_back_to_generic_message() {
        let err = ApiError::from_response(500, ApiErrorBody::default());
        assert_eq!(err.message, "An API error occurred");
        assert!(!err.has_field_errors());
    }

    #[test]
    fn from_response_keeps_field_errors() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"message":"Invalid","errors":{"name":["Name is required."]}}"#,
        )
        .unwrap();
        let err = ApiError::from_response(422, body);
        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.errors["name"], vec!["Name is required."]);
    }
}
