use linkshort_redirect::{Action, RedirectView, Status};

fn key(action: Action) -> &'static str {
    match action {
        Action::ProceedNow => "[p] go now",
        Action::Cancel => "[c] cancel",
        Action::Proceed => "[p] proceed",
        Action::Copy => "[y] copy",
        Action::Retry => "[r] retry",
        Action::Home => "[h] home",
    }
}

/// Renders a view as one status line.
pub fn render(view: &RedirectView) -> String {
    let state = &view.state;
    let mut line = match state.status() {
        Status::Loading => match &view.code {
            Some(code) => format!("{} ({code})", state.message()),
            None => state.message().to_string(),
        },
        Status::Success if state.navigated() => format!("Opening {}", state.destination()),
        Status::Success => {
            let mut notes = Vec::new();
            if let Some(host) = state.destination_host() {
                notes.push(format!("host: {host}"));
            }
            if state.countdown_seconds() > 0 {
                notes.push(format!("redirecting in {}s", state.countdown_seconds()));
            }
            let mut line = format!("{}: {}", state.message(), state.destination());
            if !notes.is_empty() {
                line.push_str(&format!(" ({})", notes.join(", ")));
            }
            line
        }
        Status::Error => format!("Error: {}", state.message()),
    };

    if !view.actions.is_empty() {
        let keys: Vec<&str> = view.actions.iter().copied().map(key).collect();
        line.push_str("  ");
        line.push_str(&keys.join("  "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkshort_core::{ResolutionResult, ShortCode};
    use linkshort_redirect::{
        ClipboardError, Host, RedirectPolicy, RedirectScheduler, TimerId,
    };
    use std::time::Duration;

    #[derive(Default)]
    struct NullHost {
        next_id: u64,
    }

    impl Host for NullHost {
        fn schedule_repeating(&mut self, _period: Duration) -> TimerId {
            self.next_id += 1;
            TimerId::new(self.next_id)
        }

        fn schedule_once(&mut self, delay: Duration) -> TimerId {
            self.schedule_repeating(delay)
        }

        fn cancel(&mut self, _timer: TimerId) {}
        fn navigate(&mut self, _destination: &str) {}
        fn navigate_home(&mut self) {}

        fn write_clipboard(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn entered(code: &str) -> (RedirectScheduler<NullHost>, linkshort_redirect::Attempt) {
        let mut scheduler = RedirectScheduler::new(NullHost::default(), RedirectPolicy::default());
        let attempt = scheduler.enter(ShortCode::new(code).unwrap());
        (scheduler, attempt)
    }

    #[test]
    fn loading_names_the_code() {
        let (scheduler, _) = entered("abc123");
        assert_eq!(render(&scheduler.view()), "Resolving link… (abc123)");
    }

    #[test]
    fn success_shows_countdown_and_keys() {
        let (mut scheduler, attempt) = entered("abc123");
        scheduler.on_resolved(
            &attempt,
            ResolutionResult::Resolved {
                destination: "https://example.com".into(),
            },
        );
        assert_eq!(
            render(&scheduler.view()),
            "Link resolved: https://example.com (host: example.com, redirecting in 5s)  \
             [p] go now  [c] cancel  [y] copy  [h] home"
        );

        scheduler.cancel_countdown();
        assert_eq!(
            render(&scheduler.view()),
            "Link resolved: https://example.com (host: example.com)  [p] proceed  [y] copy  [h] home"
        );

        scheduler.proceed();
        assert_eq!(render(&scheduler.view()), "Opening https://example.com");
    }

    #[test]
    fn success_without_parsable_host() {
        let (mut scheduler, attempt) = entered("abc123");
        scheduler.on_resolved(
            &attempt,
            ResolutionResult::Resolved {
                destination: "example.com/page".into(),
            },
        );
        scheduler.cancel_countdown();
        assert_eq!(
            render(&scheduler.view()),
            "Link resolved: example.com/page  [p] proceed  [y] copy  [h] home"
        );
    }

    #[test]
    fn error_offers_retry() {
        let (mut scheduler, attempt) = entered("deadcode");
        scheduler.on_resolved(&attempt, ResolutionResult::failed("link not found"));
        assert_eq!(
            render(&scheduler.view()),
            "Error: link not found  [r] retry  [h] home"
        );
    }
}
