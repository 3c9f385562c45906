//! # Global runtime configuration.
//!
//! Provides [`Config`], centralized settings for the actor [`System`](crate::System).
//!
//! ## Sentinel values
//! - `grace = 0s` → shutdown does not wait; any live actor is reported as stuck
//! - `ask_timeout = 0s` → convenience asks wait for a reply indefinitely

use std::time::Duration;

/// Global configuration for the actor runtime.
///
/// ## Field semantics
/// - `grace`: Maximum wait for actors to stop on [`System::shutdown`](crate::System::shutdown)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `ask_timeout`: Default timeout used by the typed ask helpers on group and device handles
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over sprinkling
/// sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for graceful shutdown.
    ///
    /// On shutdown every actor token is cancelled and the runtime waits up to
    /// `grace` for all actor tasks to exit. Overrunning it returns
    /// `RuntimeError::GraceExceeded`.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers lagging behind by more than `bus_capacity` events observe
    /// `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Default timeout for the typed ask helpers.
    ///
    /// - `Duration::ZERO` = wait for the reply without a deadline
    /// - `> 0` = fail with `AskError::Timeout` after this long
    pub ask_timeout: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the default ask timeout as an `Option`.
    ///
    /// - `None` → no deadline
    /// - `Some(d)` → asks fail after `d`
    #[inline]
    pub fn ask_deadline(&self) -> Option<Duration> {
        if self.ask_timeout == Duration::ZERO {
            None
        } else {
            Some(self.ask_timeout)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 60s`
    /// - `bus_capacity = 1024`
    /// - `ask_timeout = 3s`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(60),
            bus_capacity: 1024,
            ask_timeout: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn test_zero_ask_timeout_means_no_deadline() {
        let mut cfg = Config::default();
        assert_eq!(cfg.ask_deadline(), Some(Duration::from_secs(3)));

        cfg.ask_timeout = Duration::ZERO;
        assert_eq!(cfg.ask_deadline(), None);
    }
}
