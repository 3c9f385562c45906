//! # devicegroup
//!
//! **devicegroup** is an actor-based registry of IoT device workers.
//!
//! Each [`Group`] owns the workers of one group id. Callers ask a group to
//! track a device; the group spawns one [`Device`] worker per device id, watches
//! it, and returns its handle. Readings then flow directly between callers and
//! workers. When a worker stops, the runtime notifies the group, which drops it
//! from the membership listing.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!        caller                       caller                      caller
//!          │ TrackDevice                │ DeviceList                 │ Record/ReadTemperature
//!          ▼                            ▼                            │
//! ┌───────────────────────────────────────────────────┐              │
//! │  Group (one actor per group id)                   │              │
//! │  - devices: DeviceId -> DeviceRef                 │              │
//! │  - watches every worker it spawns                 │              │
//! └──────┬──────────────────┬──────────────────┬──────┘              │
//!        ▼ spawn+watch      ▼                  ▼                     │
//!   ┌──────────┐       ┌──────────┐       ┌──────────┐               │
//!   │  Device  │       │  Device  │       │  Device  │ ◄─────────────┘
//!   │ (last    │       │          │       │          │
//!   │  reading)│       │          │       │          │
//!   └────┬─────┘       └──────────┘       └──────────┘
//!        │ exits
//!        ▼
//! ┌───────────────────────────────────────────────────┐
//! │  System (runtime)                                 │
//! │  - exit supervisor per actor ─► WatchCell         │
//! │  - Registry of live actors                        │
//! │  - Bus (broadcast events) ─► SubscriberSet        │
//! └──────┬────────────────────────────────────────────┘
//!        │ Terminated
//!        ▼
//!   Group mailbox: WorkerTerminated ─► entry removed
//! ```
//!
//! ### Lifecycle
//! ```text
//! System::builder(cfg).build() ──► system.spawn(Group::new(id))
//!
//! TrackDevice(group, device)
//!   ├─ group mismatch     ─► dropped, TrackIgnored event
//!   ├─ live worker mapped ─► DeviceRegistered(existing)
//!   └─ otherwise          ─► spawn Device, watch, insert, DeviceRegistered(new)
//!
//! Device stops / panics / is cancelled
//!   └─► exit supervisor ─► ActorStopped|ActorPanicked ─► Terminated ─► Group
//!
//! system.shutdown()
//!   ├─► cancel root token (cascades through groups to workers)
//!   └─► wait up to Config::grace ─► AllStoppedWithin | GraceExceeded
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                         |
//! |-------------------|-----------------------------------------------------------|--------------------------------------------|
//! | **Registry**      | Per-group device registration and membership queries.     | [`Group`], [`GroupMsg`], [`GroupRef`]      |
//! | **Workers**       | Per-device state holding the latest reading.              | [`Device`], [`DeviceMsg`], [`DeviceRef`]   |
//! | **Runtime**       | Actors, mailboxes, termination watch, graceful shutdown.  | [`System`], [`Actor`], [`Context`]         |
//! | **Subscriber API**| Hook into runtime and registry events.                    | [`Subscribe`], [`Event`]                   |
//! | **Errors**        | Typed errors for sends, asks and shutdown.                | [`SendError`], [`AskError`], [`RuntimeError`] |
//! | **Configuration** | Centralize runtime settings.                              | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber emitting `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use devicegroup::{Config, Group, System};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn devicegroup::Subscribe>> = vec![Arc::new(devicegroup::LogWriter::default())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn devicegroup::Subscribe>> = Vec::new();
//!
//!     let system = System::builder(Config::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     let group = system.spawn(Group::new("floor-1"));
//!     let Some(sensor) = group.track_device("floor-1", "sensor-a").await? else {
//!         unreachable!("group id matches");
//!     };
//!     sensor.record_temperature(1, 21.5).await?;
//!     assert_eq!(sensor.read_temperature(2).await?.value, Some(21.5));
//!
//!     let listed = group.device_list(3).await?;
//!     assert!(listed.ids.contains("sensor-a"));
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod device;
mod error;
mod events;
mod group;
mod ids;
mod subscribers;
pub mod testkit;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{
    Actor, ActorId, ActorRef, Context, ExitReason, ReplyTo, System, SystemBuilder, Terminated,
    reply_channel,
};
pub use device::{Device, DeviceMsg, DeviceRef, RespondTemperature, TemperatureRecorded};
pub use error::{AskError, RuntimeError, SendError};
pub use events::{Bus, Event, EventKind};
pub use group::{DeviceRegistered, Group, GroupMsg, GroupRef, ReplyDeviceList, RequestTrackDevice};
pub use ids::{DeviceId, GroupId};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
