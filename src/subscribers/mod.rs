//! # Event subscribers.
//!
//! [`Subscribe`] is the hook for observing runtime and registry events published
//! on the [`Bus`](crate::Bus); [`SubscriberSet`] fans each event out to every
//! subscriber through its own bounded queue.
//!
//! ```text
//! Group / System ── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet
//!                                                                ┌─────────┼─────────┐
//!                                                                ▼         ▼         ▼
//!                                                            LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use devicegroup::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct RemovalCounter;
//!
//! #[async_trait]
//! impl Subscribe for RemovalCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::DeviceRemoved {
//!             // increment a counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "removal-counter" }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
