use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use url::Url;

/// Path segment the server routes short links under (`/u/{code}`).
const REDIRECT_ROUTE: &str = "u";

/// An opaque short code identifying a stored URL mapping.
///
/// The server owns the alphabet and length of codes, so the client only
/// rejects values that could never have come from a single route segment:
/// the empty string, slashes, whitespace and control characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted sources such as a server
    /// response or a router that already matched a single segment.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Extracts the short code from a route argument.
    ///
    /// Accepts either the bare code (`abc123`) or a full short URL
    /// (`http://localhost:8000/u/abc123` or `http://localhost:8000/abc123`),
    /// in which case the last path segment is used. Query strings and
    /// fragments are ignored. A URL without a code segment, such as the
    /// server root, is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkshort_core::ShortCode;
    ///
    /// let code = ShortCode::from_route("https://sho.rt/u/abc123?ref=x").unwrap();
    /// assert_eq!(code.as_str(), "abc123");
    /// assert!(ShortCode::from_route("https://sho.rt/").is_err());
    /// ```
    pub fn from_route(route: &str) -> Result<Self> {
        let route = route.trim();
        let Ok(url) = Url::parse(route) else {
            return Self::new(route);
        };

        let segments: Vec<&str> = url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [.., REDIRECT_ROUTE, code] => Self::new(*code),
            [.., code] if *code != REDIRECT_ROUTE => Self::new(*code),
            _ => Err(CoreError::InvalidShortCode(format!(
                "no short code in url: '{}'",
                route
            ))),
        }
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() {
            return Err(CoreError::InvalidShortCode(
                "short code must not be empty".to_string(),
            ));
        }

        if code
            .chars()
            .any(|c| c == '/' || c.is_whitespace() || c.is_control())
        {
            return Err(CoreError::InvalidShortCode(format!(
                "must be a single path segment: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
