//! # LogWriter: tracing-backed event logger
//!
//! A subscriber that renders incoming [`Event`]s as structured `tracing` records.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output (fmt layer)
//! ```text
//! INFO devicegroup::subscribers::log: device registered group="floor-1" device="thermo-3"
//! WARN devicegroup::subscribers::log: tracking request ignored group="floor-1" device="x" addressed_to="floor-2"
//! INFO devicegroup::subscribers::log: device removed group="floor-1" device="thermo-3" reason="stopped"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let actor = e.actor.as_deref().unwrap_or("-");
        let group = e.group.as_deref().unwrap_or("-");
        let device = e.device.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");

        match e.kind {
            EventKind::ActorSpawned => {
                tracing::debug!(seq = e.seq, actor, "actor spawned");
            }
            EventKind::ActorStopped => {
                tracing::debug!(seq = e.seq, actor, reason, "actor stopped");
            }
            EventKind::ActorPanicked => {
                tracing::error!(seq = e.seq, actor, reason, "actor panicked");
            }
            EventKind::DeviceRegistered => {
                tracing::info!(seq = e.seq, group, device, actor, "device registered");
            }
            EventKind::TrackIgnored => {
                tracing::warn!(seq = e.seq, group, device, addressed_to = reason, "tracking request ignored");
            }
            EventKind::DeviceRemoved => {
                tracing::info!(seq = e.seq, group, device, reason, "device removed");
            }
            EventKind::ShutdownRequested => {
                tracing::info!(seq = e.seq, "shutdown requested");
            }
            EventKind::AllStoppedWithin => {
                tracing::info!(seq = e.seq, "all actors stopped within grace");
            }
            EventKind::GraceExceeded => {
                tracing::warn!(seq = e.seq, "grace exceeded");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(seq = e.seq, subscriber = actor, reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(seq = e.seq, subscriber = actor, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_renders_every_kind() {
        let writer = LogWriter::new();
        let kinds = [
            EventKind::SubscriberPanicked,
            EventKind::SubscriberOverflow,
            EventKind::ActorSpawned,
            EventKind::ActorStopped,
            EventKind::ActorPanicked,
            EventKind::DeviceRegistered,
            EventKind::TrackIgnored,
            EventKind::DeviceRemoved,
            EventKind::ShutdownRequested,
            EventKind::AllStoppedWithin,
            EventKind::GraceExceeded,
        ];
        for kind in kinds {
            let ev = Event::new(kind)
                .with_group("floor-1")
                .with_device("thermo-1")
                .with_reason("stopped");
            writer.on_event(&ev).await;
        }
        assert_eq!(writer.name(), "LogWriter");
    }
}
