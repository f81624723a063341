use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

/// Identifies a timer handed out by a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Side effects the redirect scheduler needs from its environment.
///
/// Timers do not call back into the scheduler themselves: whoever drives the
/// scheduler delivers each expiry through
/// [`RedirectScheduler::on_timer`](crate::RedirectScheduler::on_timer).
/// A delivery for a timer that was cancelled in the meantime is ignored.
pub trait Host {
    /// Starts a timer that fires every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;

    /// Starts a timer that fires once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    fn cancel(&mut self, timer: TimerId);

    /// Leaves for the resolved destination.
    fn navigate(&mut self, destination: &str);

    /// Leaves for the home route.
    fn navigate_home(&mut self);

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[cfg(test)]
pub(crate) mod fake_host {
    use super::{ClipboardError, Host, TimerId};
    use crate::scheduler::RedirectScheduler;
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy)]
    struct FakeTimer {
        due: Duration,
        period: Option<Duration>,
    }

    /// Host with a simulated clock that records every side effect.
    #[derive(Debug, Default)]
    pub(crate) struct FakeHost {
        now: Duration,
        next_id: u64,
        timers: BTreeMap<TimerId, FakeTimer>,
        pub(crate) cancelled: Vec<TimerId>,
        pub(crate) navigations: Vec<String>,
        pub(crate) home_visits: usize,
        pub(crate) clipboard: Vec<String>,
        pub(crate) clipboard_broken: bool,
    }

    impl FakeHost {
        pub(crate) fn now(&self) -> Duration {
            self.now
        }

        pub(crate) fn active_timers(&self) -> usize {
            self.timers.len()
        }

        /// Fires the earliest timer due at or before `until`, moving the
        /// clock to its deadline. Repeating timers are re-armed.
        pub(crate) fn fire_next(&mut self, until: Duration) -> Option<TimerId> {
            let (id, due, period) = self
                .timers
                .iter()
                .filter(|(_, timer)| timer.due <= until)
                .min_by_key(|(id, timer)| (timer.due, **id))
                .map(|(id, timer)| (*id, timer.due, timer.period))?;

            self.now = due;
            match period {
                Some(period) => {
                    if let Some(timer) = self.timers.get_mut(&id) {
                        timer.due = due + period;
                    }
                }
                None => {
                    self.timers.remove(&id);
                }
            }
            Some(id)
        }

        fn add(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
            self.next_id += 1;
            let id = TimerId::new(self.next_id);
            self.timers.insert(
                id,
                FakeTimer {
                    due: self.now + delay,
                    period,
                },
            );
            id
        }
    }

    impl Host for FakeHost {
        fn schedule_repeating(&mut self, period: Duration) -> TimerId {
            self.add(period, Some(period))
        }

        fn schedule_once(&mut self, delay: Duration) -> TimerId {
            self.add(delay, None)
        }

        fn cancel(&mut self, timer: TimerId) {
            if self.timers.remove(&timer).is_some() {
                self.cancelled.push(timer);
            }
        }

        fn navigate(&mut self, destination: &str) {
            self.navigations.push(destination.to_string());
        }

        fn navigate_home(&mut self) {
            self.home_visits += 1;
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.clipboard_broken {
                return Err(ClipboardError::Write("permission denied".to_string()));
            }
            self.clipboard.push(text.to_string());
            Ok(())
        }
    }

    /// Runs the simulated clock forward, delivering every timer that comes due.
    pub(crate) fn advance(scheduler: &mut RedirectScheduler<FakeHost>, by: Duration) {
        let until = scheduler.host().now() + by;
        while let Some(id) = scheduler.host_mut().fire_next(until) {
            scheduler.on_timer(id);
        }
        scheduler.host_mut().now = until;
    }

    #[test]
    fn fake_host_fires_in_deadline_order() {
        let mut host = FakeHost::default();
        let slow = host.schedule_once(Duration::from_secs(3));
        let tick = host.schedule_repeating(Duration::from_secs(1));

        let until = Duration::from_secs(3);
        let mut fired = Vec::new();
        while let Some(id) = host.fire_next(until) {
            fired.push(id);
        }
        // the tick at 3s has the same deadline as `slow` but a larger id
        assert_eq!(fired, vec![tick, tick, slow, tick]);
        assert_eq!(host.active_timers(), 1);
    }
}
