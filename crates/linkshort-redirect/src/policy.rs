use std::time::Duration;
use typed_builder::TypedBuilder;

/// Countdown length used when none is configured.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 5;
/// Period of the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);
/// How long copy feedback stays visible before the resting message returns.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1200);

/// How a resolved link is navigated to, chosen once per scheduler.
///
/// A cancellable policy shows a one-second countdown the user may cancel or
/// skip. A non-cancellable policy waits `countdown_seconds` once, without a
/// visible counter, and then navigates unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RedirectPolicy {
    #[builder(default = DEFAULT_COUNTDOWN_SECS)]
    pub countdown_seconds: u32,
    #[builder(default = true)]
    pub cancellable: bool,
}

impl RedirectPolicy {
    /// Short fixed delay, no visible countdown.
    pub fn immediate() -> Self {
        Self {
            countdown_seconds: 1,
            cancellable: false,
        }
    }

    pub(crate) fn success_message(&self) -> &'static str {
        if self.cancellable {
            "Link resolved"
        } else {
            "Redirecting…"
        }
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cancellable_five_second_countdown() {
        let policy = RedirectPolicy::default();
        assert_eq!(policy.countdown_seconds, 5);
        assert!(policy.cancellable);
    }

    #[test]
    fn immediate_is_one_second_without_cancel() {
        let policy = RedirectPolicy::immediate();
        assert_eq!(policy.countdown_seconds, 1);
        assert!(!policy.cancellable);
        assert_eq!(policy.success_message(), "Redirecting…");
    }
}
