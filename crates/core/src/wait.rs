//! Cancellable, deadline-aware waits.
//!
//! Every suspension point of the game loop (sensor polling, setup retries,
//! feedback holds) goes through a [`Waiter`]. A wait ends in one of three ways:
//! the polled condition produced a value, the deadline passed, or the
//! [`CancelToken`] was triggered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Outcome of a wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wait<T> {
    Ready(T),
    TimedOut,
    Cancelled,
}

impl<T> Wait<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Wait<U> {
        match self {
            Wait::Ready(v) => Wait::Ready(f(v)),
            Wait::TimedOut => Wait::TimedOut,
            Wait::Cancelled => Wait::Cancelled,
        }
    }
}

/// Fixed-interval poller with an optional overall timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waiter {
    interval: Duration,
    timeout: Option<Duration>,
}

/// Sleep granularity used so that cancellation is noticed promptly during long pauses.
const CANCEL_SLICE: Duration = Duration::from_millis(20);

impl Waiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Call `f` until it yields `Some`, sleeping `interval` between attempts.
    ///
    /// `f` runs at least once, even with an already-expired deadline, so a
    /// value that is ready immediately is never reported as a timeout.
    /// Errors from `f` propagate unchanged.
    pub fn poll_until<T>(
        &self,
        cancel: &CancelToken,
        mut f: impl FnMut() -> Result<Option<T>>,
    ) -> Result<Wait<T>> {
        let deadline = self.timeout.map(|t| Instant::now() + t);
        loop {
            if cancel.is_cancelled() {
                return Ok(Wait::Cancelled);
            }
            if let Some(value) = f()? {
                return Ok(Wait::Ready(value));
            }
            let sleep_for = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(Wait::TimedOut);
                    }
                    self.interval.min(deadline - now)
                }
                None => self.interval,
            };
            if let Wait::Cancelled = pause(cancel, sleep_for) {
                return Ok(Wait::Cancelled);
            }
        }
    }
}

/// Sleep for `duration`, waking early if `cancel` fires.
pub fn pause(cancel: &CancelToken, duration: Duration) -> Wait<()> {
    let end = Instant::now() + duration;
    loop {
        if cancel.is_cancelled() {
            return Wait::Cancelled;
        }
        let now = Instant::now();
        if now >= end {
            return Wait::Ready(());
        }
        thread::sleep((end - now).min(CANCEL_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_until_returns_first_ready_value() {
        let waiter = Waiter::new(Duration::from_millis(1));
        let cancel = CancelToken::new();
        let mut calls = 0;
        let out = waiter
            .poll_until(&cancel, || {
                calls += 1;
                Ok(if calls == 3 { Some(calls) } else { None })
            })
            .unwrap();
        assert_eq!(out, Wait::Ready(3));
    }

    #[test]
    fn poll_until_times_out() {
        let waiter = Waiter::new(Duration::from_millis(1)).with_timeout(Some(Duration::from_millis(10)));
        let cancel = CancelToken::new();
        let out: Wait<()> = waiter.poll_until(&cancel, || Ok(None)).unwrap();
        assert_eq!(out, Wait::TimedOut);
    }

    #[test]
    fn poll_until_observes_cancellation() {
        let waiter = Waiter::new(Duration::from_millis(1));
        let cancel = CancelToken::new();
        let mut calls = 0;
        let trigger = cancel.clone();
        let out: Wait<()> = waiter
            .poll_until(&cancel, || {
                calls += 1;
                if calls == 2 {
                    trigger.cancel();
                }
                Ok(None)
            })
            .unwrap();
        assert_eq!(out, Wait::Cancelled);
        assert_eq!(calls, 2);
    }

    #[test]
    fn zero_timeout_still_polls_once() {
        let waiter = Waiter::new(Duration::from_millis(50)).with_timeout(Some(Duration::ZERO));
        let out = waiter.poll_until(&CancelToken::new(), || Ok(Some(7))).unwrap();
        assert_eq!(out, Wait::Ready(7));
    }

    #[test]
    fn pause_is_cut_short_by_cancel() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let start = Instant::now();
        assert_eq!(pause(&cancel, Duration::from_secs(5)), Wait::Cancelled);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
