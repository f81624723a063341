use linkshort_core::resolution::MISSING_DESTINATION;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by [`crate::HttpLinkClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build http client: {0}")]
    Init(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned 404: {}", message.as_deref().unwrap_or("not found"))]
    NotFound {
        endpoint: String,
        message: Option<String>,
    },
    #[error("{endpoint} returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Api {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Text suitable for showing to the user.
    ///
    /// A server-supplied `{error}` message wins, then the transport-level
    /// description. The caller substitutes a generic message for blank text.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotFound {
                message: Some(message),
                ..
            }
            | ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::NotFound { .. } => status_message(404),
            ClientError::Api { status, .. } => status_message(*status),
            ClientError::Transport { source, .. } => source.to_string(),
            ClientError::MalformedResponse { .. } => MISSING_DESTINATION.to_string(),
            ClientError::InvalidBaseUrl(_) | ClientError::Init(_) => self.to_string(),
        }
    }
}

fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}
