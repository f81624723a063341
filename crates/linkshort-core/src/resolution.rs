use crate::model::{LookupResponse, OneOrMany};

/// Failure reason when a lookup succeeds but carries no usable destination.
pub const MISSING_DESTINATION: &str = "Missing destination URL";
/// Failure reason used when neither the server nor the transport said anything.
pub const LINK_NOT_FOUND: &str = "Link not found";

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// The code maps to a non-empty destination URL.
    Resolved { destination: String },
    /// The code could not be resolved; `reason` is shown to the user as-is.
    Failed { reason: String },
}

impl ResolutionResult {
    /// Builds a failure, substituting [`LINK_NOT_FOUND`] for a blank reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return ResolutionResult::Failed {
                reason: LINK_NOT_FOUND.to_string(),
            };
        }
        ResolutionResult::Failed { reason }
    }

    /// Normalizes a successful lookup response.
    ///
    /// A list takes its first element; an empty or absent destination is a
    /// failure rather than an empty success.
    pub fn from_lookup(response: LookupResponse) -> Self {
        match response
            .original_url
            .and_then(OneOrMany::into_first)
            .filter(|url| !url.trim().is_empty())
        {
            Some(destination) => ResolutionResult::Resolved { destination },
            None => ResolutionResult::Failed {
                reason: MISSING_DESTINATION.to_string(),
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionResult::Resolved { .. })
    }

    pub fn destination(&self) -> Option<&str> {
        match self {
            ResolutionResult::Resolved { destination } => Some(destination),
            ResolutionResult::Failed { .. } => None,
        }
    }
}
