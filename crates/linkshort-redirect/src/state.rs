use std::fmt::{Display, Formatter};
use url::Url;

pub(crate) const LOADING_MESSAGE: &str = "Resolving link…";
pub(crate) const COPIED_MESSAGE: &str = "Copied to clipboard";
pub(crate) const COPY_FAILED_MESSAGE: &str = "Copy failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Loading,
    Success,
    Error,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Loading => write!(f, "loading"),
            Status::Success => write!(f, "success"),
            Status::Error => write!(f, "error"),
        }
    }
}

/// Observable state of one redirect attempt.
///
/// `destination` is non-empty exactly when `status` is [`Status::Success`].
/// Fields are only written by the scheduler, which upholds that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectState {
    status: Status,
    message: String,
    destination: String,
    countdown_seconds: u32,
    navigated: bool,
}

impl RedirectState {
    pub(crate) fn loading() -> Self {
        Self {
            status: Status::Loading,
            message: LOADING_MESSAGE.to_string(),
            destination: String::new(),
            countdown_seconds: 0,
            navigated: false,
        }
    }

    pub(crate) fn success(destination: String, message: &str, countdown_seconds: u32) -> Self {
        Self {
            status: Status::Success,
            message: message.to_string(),
            destination,
            countdown_seconds,
            navigated: false,
        }
    }

    pub(crate) fn error(reason: String) -> Self {
        Self {
            status: Status::Error,
            message: reason,
            destination: String::new(),
            countdown_seconds: 0,
            navigated: false,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The resolved URL, empty unless the status is success.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Whether the final navigation to `destination` has happened.
    pub fn navigated(&self) -> bool {
        self.navigated
    }

    /// Host of the destination URL with any non-default port, for display
    /// next to it. `None` unless the destination is an absolute URL with a host.
    pub fn destination_host(&self) -> Option<String> {
        let url = Url::parse(&self.destination).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    pub(crate) fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    pub(crate) fn tick(&mut self) {
        self.countdown_seconds = self.countdown_seconds.saturating_sub(1);
    }

    pub(crate) fn stop_countdown(&mut self) {
        self.countdown_seconds = 0;
    }

    pub(crate) fn mark_navigated(&mut self) {
        self.countdown_seconds = 0;
        self.navigated = true;
    }
}

impl Default for RedirectState {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_has_no_destination() {
        let state = RedirectState::loading();
        assert_eq!(state.status(), Status::Loading);
        assert_eq!(state.message(), "Resolving link…");
        assert!(state.destination().is_empty());
    }

    #[test]
    fn destination_host() {
        let state = RedirectState::success("https://user@example.com:8443/a?b".into(), "", 5);
        assert_eq!(state.destination_host().as_deref(), Some("example.com:8443"));

        let state = RedirectState::success("https://Example.com:443/".into(), "", 5);
        assert_eq!(state.destination_host().as_deref(), Some("example.com"));

        for destination in ["not a url", "example.com/path", "mailto:a@b.example", ""] {
            let state = RedirectState::success(destination.into(), "", 5);
            assert_eq!(state.destination_host(), None, "{destination}");
        }
    }

    #[test]
    fn navigated_clears_countdown() {
        let mut state = RedirectState::success("https://example.com".into(), "", 3);
        state.tick();
        assert_eq!(state.countdown_seconds(), 2);
        state.mark_navigated();
        assert_eq!(state.countdown_seconds(), 0);
        assert!(state.navigated());
    }
}
