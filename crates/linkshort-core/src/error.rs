use thiserror::Error;

/// Errors related to the core types of the linkshort client.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("unknown expiry option: {0}")]
    UnknownExpiry(String),
}
