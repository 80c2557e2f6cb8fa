//! API envelope and pagination contracts.
//!
//! The backend wraps every successful payload in [`ApiEnvelope`] and every
//! failure in [`ApiErrorBody`]. List endpoints return a [`PaginatedResponse`]
//! under the envelope's `data` key.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Toast category attached to backend responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Server-driven notification payload (`notification` key of the envelope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
}

/// Standard success envelope: `{ data, message?, status?, notification? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub notification: Option<Notification>,
}

/// Body shape the backend uses for non-2xx responses.
///
/// All fields are optional; the HTTP layer fills in fallbacks when the body
/// is missing or malformed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub notification: Option<Notification>,
}

/// Laravel-style paginator. `per_page` arrives as either a number or a
/// numeric string depending on the endpoint, so it gets a lenient
/// deserializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// Empty first page, used as a placeholder before the first fetch.
    pub fn empty(per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            per_page,
            total: 0,
            last_page: 1,
            from: None,
            to: None,
        }
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_accepts_number_and_string() {
        let json = r#"{"data":[],"current_page":1,"per_page":10,"total":0,"last_page":1}"#;
        let page: PaginatedResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.per_page, 10);

        let json = r#"{"data":[],"current_page":1,"per_page":"25","total":0,"last_page":1}"#;
        let page: PaginatedResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(page.per_page, 25);
    }

    #[test]
    fn notification_round_trips_type_tag() {
        let json = r#"{"type":"success","title":"Saved","message":"Product saved"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Success);
        let back = serde_json::to_value(&n).unwrap();
        assert_eq!(back["type"], "success");
    }
}
