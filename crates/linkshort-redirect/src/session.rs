use crate::host::{ClipboardError, Host, TimerId};
use crate::policy::RedirectPolicy;
use crate::scheduler::{Attempt, RedirectScheduler, RedirectView};
use linkshort_core::{ResolutionResult, Resolver, ShortCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Where navigation ends up.
pub trait Navigator: Send + 'static {
    fn navigate(&mut self, destination: &str);
    fn navigate_home(&mut self);
}

pub trait Clipboard: Send + 'static {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// [`Host`] backed by tokio timers.
///
/// Each timer is a spawned task that sends its id over a channel when it
/// fires; cancelling aborts the task. An expiry that was already queued when
/// the timer got cancelled is still delivered and ignored by the scheduler.
pub struct TokioHost<N, C> {
    navigator: N,
    clipboard: C,
    next_id: u64,
    timers: HashMap<TimerId, JoinHandle<()>>,
    fired: mpsc::UnboundedSender<TimerId>,
}

impl<N: Navigator, C: Clipboard> TokioHost<N, C> {
    pub fn new(navigator: N, clipboard: C) -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired, expiries) = mpsc::unbounded_channel();
        let host = Self {
            navigator,
            clipboard,
            next_id: 0,
            timers: HashMap::new(),
            fired,
        };
        (host, expiries)
    }

    fn next_id(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::new(self.next_id)
    }

    /// Drops handles of one-shot timers that already fired.
    fn reap(&mut self) {
        self.timers.retain(|_, handle| !handle.is_finished());
    }
}

impl<N: Navigator, C: Clipboard> Host for TokioHost<N, C> {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        let id = self.next_id();
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if fired.send(id).is_err() {
                    break;
                }
            }
        });
        self.timers.insert(id, handle);
        id
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = self.next_id();
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(id);
        });
        self.timers.insert(id, handle);
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(handle) = self.timers.remove(&timer) {
            handle.abort();
        }
    }

    fn navigate(&mut self, destination: &str) {
        self.navigator.navigate(destination);
    }

    fn navigate_home(&mut self) {
        self.navigator.navigate_home();
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.write_text(text)
    }
}

impl<N, C> Drop for TokioHost<N, C> {
    fn drop(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }
}

/// User input to a running [`RedirectSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Present a different short code.
    Enter(ShortCode),
    Cancel,
    Proceed,
    Copy,
    Retry,
    Home,
    Teardown,
}

/// Drives a [`RedirectScheduler`] on tokio.
///
/// Resolver calls run on spawned tasks so a superseded lookup may finish
/// at any time; the session feeds its result to the scheduler, which drops
/// it. Every change is published as a [`RedirectView`].
pub struct RedirectSession<R, N, C> {
    resolver: Arc<R>,
    scheduler: RedirectScheduler<TokioHost<N, C>>,
    expiries: mpsc::UnboundedReceiver<TimerId>,
    views: watch::Sender<RedirectView>,
}

impl<R, N, C> RedirectSession<R, N, C>
where
    R: Resolver,
    N: Navigator,
    C: Clipboard,
{
    pub fn new(
        resolver: Arc<R>,
        policy: RedirectPolicy,
        navigator: N,
        clipboard: C,
    ) -> (Self, watch::Receiver<RedirectView>) {
        let (host, expiries) = TokioHost::new(navigator, clipboard);
        let scheduler = RedirectScheduler::new(host, policy);
        let (views, view_rx) = watch::channel(scheduler.view());
        let session = Self {
            resolver,
            scheduler,
            expiries,
            views,
        };
        (session, view_rx)
    }

    /// Resolves `code` and handles commands until the view is left.
    ///
    /// Returns the final view once the destination was navigated to, the
    /// user went home, the session was torn down, or `commands` closed.
    pub async fn run(
        self,
        code: ShortCode,
        mut commands: mpsc::Receiver<Command>,
    ) -> RedirectView {
        let Self {
            resolver,
            mut scheduler,
            mut expiries,
            views,
        } = self;
        let (resolved_tx, mut resolved_rx) = mpsc::unbounded_channel();

        let attempt = scheduler.enter(code);
        spawn_resolve(&resolver, attempt, &resolved_tx);
        views.send_replace(scheduler.view());

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => {
                        trace!(command = ?command, "handling command");
                        if let Some(attempt) = apply(&mut scheduler, command) {
                            spawn_resolve(&resolver, attempt, &resolved_tx);
                        }
                    }
                    None => {
                        debug!("command channel closed");
                        scheduler.teardown();
                    }
                },
                Some(timer) = expiries.recv() => {
                    scheduler.on_timer(timer);
                    scheduler.host_mut().reap();
                }
                Some((attempt, result)) = resolved_rx.recv() => {
                    scheduler.on_resolved(&attempt, result);
                }
            }

            views.send_replace(scheduler.view());
            if scheduler.is_closed() || scheduler.state().navigated() {
                break;
            }
        }

        scheduler.teardown();
        scheduler.view()
    }
}

fn apply<H: Host>(scheduler: &mut RedirectScheduler<H>, command: Command) -> Option<Attempt> {
    match command {
        Command::Enter(code) => return Some(scheduler.enter(code)),
        Command::Retry => return scheduler.retry(),
        Command::Cancel => {
            scheduler.cancel_countdown();
        }
        Command::Proceed => {
            scheduler.proceed();
        }
        Command::Copy => {
            scheduler.copy_destination();
        }
        Command::Home => {
            scheduler.go_home();
        }
        Command::Teardown => scheduler.teardown(),
    }
    None
}

fn spawn_resolve<R: Resolver>(
    resolver: &Arc<R>,
    attempt: Attempt,
    results: &mpsc::UnboundedSender<(Attempt, ResolutionResult)>,
) {
    let resolver = Arc::clone(resolver);
    let results = results.clone();
    tokio::spawn(async move {
        let result = resolver.resolve(attempt.code()).await;
        // the session may already have ended
        let _ = results.send((attempt, result));
    });
}
