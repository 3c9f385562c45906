//! # Test helpers for message-driven code.
//!
//! - [`Probe`] a reply inbox that keeps its own sender alive, so "no reply"
//!   is observable as silence within a timeout rather than a closed channel;
//! - [`await_assert`] retries an eventually-consistent check until it passes
//!   or the deadline elapses.
//!
//! ## Example
//! ```
//! use std::time::Duration;
//! use devicegroup::{Config, GroupMsg, Group, RequestTrackDevice, System};
//! use devicegroup::testkit::Probe;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let system = System::builder(Config::default()).build();
//! let group = system.spawn(Group::new("group"));
//!
//! let mut probe = Probe::new();
//! group.tell(GroupMsg::TrackDevice {
//!     request: RequestTrackDevice::new("other", "device1"),
//!     reply_to: probe.reply_to(),
//! }).unwrap();
//! probe.expect_no_msg(Duration::from_millis(100)).await;
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::core::ReplyTo;

/// Reply inbox for tests.
pub struct Probe<T> {
    tx: mpsc::UnboundedSender<T>,
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Probe<T> {
    /// Creates an empty probe.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Reply channel delivering into this probe.
    pub fn reply_to(&self) -> ReplyTo<T> {
        ReplyTo::from(self.tx.clone())
    }

    /// Waits for the next message.
    ///
    /// # Panics
    /// If nothing arrives within `within`.
    pub async fn expect_msg(&mut self, within: Duration) -> T {
        match time::timeout(within, self.rx.recv()).await {
            Ok(Some(msg)) => msg,
            Ok(None) => unreachable!("probe holds its own sender"),
            Err(_) => panic!("timeout ({within:?}) while waiting for a message"),
        }
    }

    /// Asserts that nothing arrives for `within`.
    ///
    /// # Panics
    /// If a message arrives.
    pub async fn expect_no_msg(&mut self, within: Duration) {
        if let Ok(Some(_)) = time::timeout(within, self.rx.recv()).await {
            panic!("received unexpected message within {within:?}");
        }
    }

    /// Returns a message if one is already queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

impl<T> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-runs `check` every `interval` until it returns `Ok` or `max` has elapsed.
///
/// Returns the first `Ok`, or the last `Err` once the deadline has passed.
/// `check` always runs at least once.
pub async fn await_assert<F, Fut, T, E>(max: Duration, interval: Duration, mut check: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let deadline = Instant::now() + max;
    loop {
        match check().await {
            Ok(v) => return Ok(v),
            Err(e) if Instant::now() >= deadline => return Err(e),
            Err(_) => time::sleep(interval).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_probe_receives_replies() {
        let mut probe = Probe::new();
        probe.reply_to().tell(7u64);
        assert_eq!(probe.expect_msg(Duration::from_millis(100)).await, 7);
        probe.expect_no_msg(Duration::from_millis(20)).await;
        assert!(probe.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_assert_retries_until_ok() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let res: Result<u32, &str> = await_assert(Duration::from_secs(1), Duration::from_millis(10), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { if n >= 3 { Ok(n) } else { Err("not yet") } }
        })
        .await;
        assert_eq!(res, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_assert_returns_last_error_after_deadline() {
        let res: Result<(), &str> =
            await_assert(Duration::from_millis(50), Duration::from_millis(10), || async { Err("never") }).await;
        assert_eq!(res, Err("never"));
    }
}
