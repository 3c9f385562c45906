//! Runtime events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `System` (spawn, shutdown), the per-actor exit supervisor
//!   (stopped/panicked), `Group` (registered/ignored/removed), `SubscriberSet`
//!   workers (overflow/panic).
//! - **Consumers**: `System::subscriber_listener()` fanning out to the
//!   `SubscriberSet`, and any caller holding a `Bus::subscribe()` receiver.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
