//! Wire models for the link endpoints.

use serde::{Deserialize, Serialize};

/// A JSON field that may hold a single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Returns the value, or the first element of the list.
    pub fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.into_iter().next(),
        }
    }
}

/// Response body of `GET /links/{code}`.
///
/// Only `original_url` matters for resolution; the remaining fields are kept
/// for display. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub original_url: Option<OneOrMany<String>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub short_url: Option<String>,
    /// Expiry instant in epoch milliseconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body of `POST /links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    pub url: String,
    /// Expiry instant in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// Response body of `POST /links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    pub short_url: String,
    pub original_url: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup(value: serde_json::Value) -> LookupResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn original_url_as_string() {
        let resp = lookup(json!({ "original_url": "https://example.com/page" }));
        assert_eq!(
            resp.original_url,
            Some(OneOrMany::One("https://example.com/page".to_string()))
        );
    }

    #[test]
    fn original_url_as_array() {
        let resp = lookup(json!({ "original_url": ["https://a.example/x", "https://b.example"] }));
        let url = resp.original_url.and_then(OneOrMany::into_first);
        assert_eq!(url.as_deref(), Some("https://a.example/x"));
    }

    #[test]
    fn original_url_missing_or_null() {
        assert_eq!(lookup(json!({ "code": "abc" })).original_url, None);
        assert_eq!(lookup(json!({ "original_url": null })).original_url, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let resp = lookup(json!({
            "original_url": "https://example.com",
            "code": "abc123",
            "clicks": 42
        }));
        assert_eq!(resp.code.as_deref(), Some("abc123"));
    }

    #[test]
    fn create_request_omits_missing_expiry() {
        let req = CreateLinkRequest {
            url: "https://example.com".to_string(),
            expires_at: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "url": "https://example.com" })
        );
    }
}
