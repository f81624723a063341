use crate::host::{Host, TimerId};
use crate::policy::{RedirectPolicy, FEEDBACK_DELAY, TICK_PERIOD};
use crate::state::{RedirectState, Status, COPIED_MESSAGE, COPY_FAILED_MESSAGE};
use linkshort_core::{ResolutionResult, ShortCode};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// One resolution of one short code.
///
/// Returned by [`RedirectScheduler::enter`] and [`RedirectScheduler::retry`];
/// the caller runs the resolver for [`Attempt::code`] and hands the result
/// back together with this token. Results for an attempt that is no longer
/// current are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    generation: u64,
    code: ShortCode,
}

impl Attempt {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn code(&self) -> &ShortCode {
        &self.code
    }
}

/// User actions the current state offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Skip the running countdown.
    ProceedNow,
    /// Stop the running countdown.
    Cancel,
    /// Navigate after the countdown was cancelled or ran out without navigating.
    Proceed,
    Copy,
    Retry,
    Home,
}

/// Snapshot of the scheduler for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectView {
    pub code: Option<ShortCode>,
    pub state: RedirectState,
    pub actions: Vec<Action>,
}

/// State machine driving the redirect for one short code at a time.
///
/// `Loading → Success → navigated` or `Loading → Error`. Every method runs to
/// completion on `&mut self`, so the owner decides how events are serialized;
/// [`crate::RedirectSession`] does it on a single tokio task.
pub struct RedirectScheduler<H> {
    host: H,
    policy: RedirectPolicy,
    state: RedirectState,
    code: Option<ShortCode>,
    generation: u64,
    redirect_timer: Option<TimerId>,
    feedback_timer: Option<TimerId>,
    closed: bool,
}

impl<H: Host> RedirectScheduler<H> {
    pub fn new(host: H, policy: RedirectPolicy) -> Self {
        Self {
            host,
            policy,
            state: RedirectState::loading(),
            code: None,
            generation: 0,
            redirect_timer: None,
            feedback_timer: None,
            closed: false,
        }
    }

    pub fn state(&self) -> &RedirectState {
        &self.state
    }

    pub fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    pub fn code(&self) -> Option<&ShortCode> {
        self.code.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether the view was torn down or left for the home route.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Presents a (new) short code and starts resolving it.
    ///
    /// Everything belonging to the previous attempt is invalidated first.
    pub fn enter(&mut self, code: ShortCode) -> Attempt {
        self.invalidate();
        self.closed = false;
        self.state = RedirectState::loading();
        self.code = Some(code.clone());
        info!(code = %code, generation = self.generation, "resolving short code");

        Attempt {
            generation: self.generation,
            code,
        }
    }

    /// Applies a resolver result. Returns `false` if the attempt is stale.
    pub fn on_resolved(&mut self, attempt: &Attempt, result: ResolutionResult) -> bool {
        if !self.is_current(attempt) || self.state.status() != Status::Loading {
            debug!(
                code = %attempt.code,
                generation = attempt.generation,
                current = self.generation,
                "discarding stale resolution"
            );
            return false;
        }

        match result {
            ResolutionResult::Resolved { destination } => self.begin_redirect(destination),
            ResolutionResult::Failed { reason } => {
                warn!(code = %attempt.code, reason = %reason, "short code failed to resolve");
                self.state = RedirectState::error(reason);
            }
        }
        true
    }

    /// Delivers a timer expiry. Returns `false` for timers this scheduler no
    /// longer owns.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        if self.redirect_timer == Some(timer) {
            self.on_redirect_timer();
            return true;
        }
        if self.feedback_timer == Some(timer) {
            self.feedback_timer = None;
            if self.state.status() == Status::Success {
                self.state.set_message(self.policy.success_message());
            }
            return true;
        }
        trace!(timer = %timer, "ignoring timer that is no longer active");
        false
    }

    /// Stops the running countdown. The destination stays, and
    /// [`proceed`](Self::proceed) remains available.
    pub fn cancel_countdown(&mut self) -> bool {
        if !self.is_active()
            || !self.policy.cancellable
            || self.state.status() != Status::Success
            || self.state.navigated()
            || self.state.countdown_seconds() == 0
        {
            return false;
        }

        self.stop_redirect_timer();
        self.state.stop_countdown();
        info!(destination = %self.state.destination(), "countdown cancelled");
        true
    }

    /// Navigates now, regardless of any remaining countdown.
    pub fn proceed(&mut self) -> bool {
        if !self.is_active() || self.state.status() != Status::Success {
            return false;
        }
        self.navigate_once()
    }

    /// Copies the destination to the clipboard and shows transient feedback.
    pub fn copy_destination(&mut self) -> bool {
        if !self.is_active() || self.state.status() != Status::Success || self.state.navigated()
        {
            return false;
        }

        match self.host.write_clipboard(self.state.destination()) {
            Ok(()) => {
                debug!(destination = %self.state.destination(), "copied destination");
                self.state.set_message(COPIED_MESSAGE);
            }
            Err(error) => {
                warn!(error = %error, "failed to copy destination");
                self.state.set_message(COPY_FAILED_MESSAGE);
            }
        }

        self.stop_feedback_timer();
        self.feedback_timer = Some(self.host.schedule_once(FEEDBACK_DELAY));
        true
    }

    /// Re-runs the resolution of the current code after an error.
    pub fn retry(&mut self) -> Option<Attempt> {
        if !self.is_active() || self.state.status() != Status::Error {
            return None;
        }
        let code = self.code.clone()?;
        Some(self.enter(code))
    }

    /// Leaves the view for the home route.
    pub fn go_home(&mut self) -> bool {
        if !self.is_active() || self.state.navigated() {
            return false;
        }
        self.teardown();
        info!("navigating home");
        self.host.navigate_home();
        true
    }

    /// Stops every timer and discards any in-flight resolution.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.invalidate();
        self.closed = true;
        debug!(generation = self.generation, "redirect view torn down");
    }

    pub fn actions(&self) -> Vec<Action> {
        if !self.is_active() || self.state.navigated() {
            return Vec::new();
        }
        match self.state.status() {
            Status::Loading => Vec::new(),
            Status::Error => vec![Action::Retry, Action::Home],
            Status::Success if self.redirect_timer.is_some() && self.policy.cancellable => {
                vec![Action::ProceedNow, Action::Cancel, Action::Copy, Action::Home]
            }
            Status::Success if self.redirect_timer.is_some() => {
                vec![Action::ProceedNow, Action::Copy, Action::Home]
            }
            Status::Success => vec![Action::Proceed, Action::Copy, Action::Home],
        }
    }

    pub fn view(&self) -> RedirectView {
        RedirectView {
            code: self.code.clone(),
            state: self.state.clone(),
            actions: self.actions(),
        }
    }

    fn begin_redirect(&mut self, destination: String) {
        let seconds = self.policy.countdown_seconds;
        self.state =
            RedirectState::success(destination, self.policy.success_message(), seconds);
        info!(
            destination = %self.state.destination(),
            countdown = seconds,
            cancellable = self.policy.cancellable,
            "short code resolved"
        );

        if seconds == 0 {
            self.navigate_once();
        } else if self.policy.cancellable {
            self.redirect_timer = Some(self.host.schedule_repeating(TICK_PERIOD));
        } else {
            let delay = Duration::from_secs(u64::from(seconds));
            self.redirect_timer = Some(self.host.schedule_once(delay));
        }
    }

    fn on_redirect_timer(&mut self) {
        if !self.policy.cancellable || self.state.countdown_seconds() <= 1 {
            self.navigate_once();
            return;
        }
        self.state.tick();
        trace!(remaining = self.state.countdown_seconds(), "countdown tick");
    }

    /// The single path to the destination: the timer is stopped before
    /// navigating, and a second call is a no-op.
    fn navigate_once(&mut self) -> bool {
        if self.state.navigated() || self.state.status() != Status::Success {
            return false;
        }
        self.stop_redirect_timer();
        self.stop_feedback_timer();
        self.state.mark_navigated();
        info!(destination = %self.state.destination(), "navigating to destination");
        self.host.navigate(self.state.destination());
        true
    }

    fn is_current(&self, attempt: &Attempt) -> bool {
        !self.closed && attempt.generation == self.generation
    }

    fn is_active(&self) -> bool {
        !self.closed && self.code.is_some()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.stop_redirect_timer();
        self.stop_feedback_timer();
    }

    fn stop_redirect_timer(&mut self) {
        if let Some(timer) = self.redirect_timer.take() {
            self.host.cancel(timer);
        }
    }

    fn stop_feedback_timer(&mut self) {
        if let Some(timer) = self.feedback_timer.take() {
            self.host.cancel(timer);
        }
    }
}
