//! # Runtime events emitted by the actor system and the registry actors.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Actor lifecycle**: actor spawned, stopped, panicked
//! - **Registry**: device registered, tracking request ignored, device removed
//! - **Shutdown**: shutdown requested, finished within grace, grace exceeded
//! - **Subscriber**: subscriber overflow/panic
//!
//! Events are observability only. No component reacts to the bus to mutate
//! state; registry membership changes travel through actor mailboxes.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use devicegroup::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::DeviceRegistered)
//!     .with_group("floor-1")
//!     .with_device("thermo-3");
//!
//! assert_eq!(ev.kind, EventKind::DeviceRegistered);
//! assert_eq!(ev.group.as_deref(), Some("floor-1"));
//! assert_eq!(ev.device.as_deref(), Some("thermo-3"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `actor`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `actor`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    // === Actor lifecycle ===
    /// Actor task was spawned.
    ///
    /// Sets:
    /// - `actor`: actor name
    ActorSpawned,

    /// Actor exited without panicking (explicit stop or cancellation).
    ///
    /// Sets:
    /// - `actor`: actor name
    /// - `reason`: "stopped" or "cancelled"
    ActorStopped,

    /// Actor task panicked.
    ///
    /// Sets:
    /// - `actor`: actor name
    /// - `reason`: panic message
    ActorPanicked,

    // === Registry ===
    /// A group created a new device worker.
    ///
    /// Sets:
    /// - `group`, `device`
    /// - `actor`: worker actor name
    DeviceRegistered,

    /// A group dropped a tracking request addressed to another group id.
    ///
    /// Sets:
    /// - `group`: the receiving group's id
    /// - `device`: requested device id
    /// - `reason`: the group id the request was addressed to
    TrackIgnored,

    /// A group removed a device after observing its worker's termination.
    ///
    /// Sets:
    /// - `group`, `device`
    /// - `reason`: exit reason label
    DeviceRemoved,

    // === Shutdown events ===
    /// Shutdown requested on the system.
    ShutdownRequested,

    /// All actors stopped within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some actors did not stop in time.
    GraceExceeded,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Actor (or subscriber) name, if applicable.
    pub actor: Option<Arc<str>>,
    /// Group id, if applicable.
    pub group: Option<Arc<str>>,
    /// Device id, if applicable.
    pub device: Option<Arc<str>>,
    /// Human-readable reason (exit reason, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            actor: None,
            group: None,
            device: None,
            reason: None,
        }
    }

    /// Attaches an actor name.
    #[inline]
    pub fn with_actor(mut self, actor: impl Into<Arc<str>>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Attaches a group id.
    #[inline]
    pub fn with_group(mut self, group: impl Into<Arc<str>>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Attaches a device id.
    #[inline]
    pub fn with_device(mut self, device: impl Into<Arc<str>>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_actor(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_actor(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
