//! # System: hosts actors, supervises their exit, and shuts down gracefully.
//!
//! The [`System`] owns the event bus, the [`SubscriberSet`], the live-actor
//! table and the root cancellation token. Every actor is spawned through it,
//! either directly ([`System::spawn`]) or as a child ([`Context::spawn`](crate::Context::spawn)).
//!
//! ## Spawn path
//! ```text
//! spawn(actor)
//!   ├─► ActorId::next(), mailbox, WatchCell
//!   ├─► Registry.insert(id, name), publish ActorSpawned
//!   ├─► tracker.spawn(run_actor(actor, mailbox, ctx))     ── actor task
//!   └─► tracker.spawn(exit supervisor)                     ── awaits the actor task
//!            ├─ Ok(reason)        → Stopped / Cancelled
//!            ├─ Err(panic)        → Panicked(message)
//!            ├─► Registry.remove(id)
//!            ├─► publish ActorStopped / ActorPanicked
//!            └─► WatchCell.terminate(Terminated)  → watchers' mailboxes
//! ```
//!
//! ## Shutdown path
//! ```text
//! shutdown()
//!   ├─► publish ShutdownRequested
//!   ├─► runtime_token.cancel()   → propagates to every actor token
//!   └─► wait for all tracked tasks within cfg.grace:
//!          ├─ Ok      → publish AllStoppedWithin
//!          └─ Timeout → publish GraceExceeded, Err(GraceExceeded { stuck })
//! ```

use std::any::Any;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::actor::{Actor, Context, run_actor};
use super::builder::SystemBuilder;
use super::handle::{ActorId, ActorRef};
use super::registry::Registry;
use super::watch::{ExitReason, Terminated, WatchCell};
use crate::config::Config;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::SubscriberSet;

/// Hosts actors and coordinates their supervision and shutdown.
pub struct System {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    registry: Arc<Registry>,
    runtime_token: CancellationToken,
    tracker: TaskTracker,
}

impl System {
    /// Starts building a system with the given configuration.
    pub fn builder(cfg: Config) -> SystemBuilder {
        SystemBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        registry: Arc<Registry>,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            subs,
            registry,
            runtime_token,
            tracker: TaskTracker::new(),
        }
    }

    /// Spawns a top-level actor.
    pub fn spawn<A: Actor>(self: &Arc<Self>, actor: A) -> ActorRef<A> {
        self.spawn_with_token(actor, self.runtime_token.child_token())
    }

    pub(crate) fn spawn_with_token<A: Actor>(
        self: &Arc<Self>,
        actor: A,
        token: CancellationToken,
    ) -> ActorRef<A> {
        let id = ActorId::next();
        let name: Arc<str> = actor.name().into();
        let (tx, mailbox) = mpsc::unbounded_channel();
        let cell = Arc::new(WatchCell::new());
        let myself = ActorRef::new(
            id,
            Arc::clone(&name),
            tx,
            Arc::clone(&cell),
            self.cfg.ask_deadline(),
        );

        self.registry.insert(id, Arc::clone(&name));
        self.bus
            .publish(Event::new(EventKind::ActorSpawned).with_actor(Arc::clone(&name)));

        let ctx = Context::new(myself.clone(), token, Arc::clone(self));
        let join = self.tracker.spawn(run_actor(actor, mailbox, ctx));

        let registry = Arc::clone(&self.registry);
        let bus = self.bus.clone();
        self.tracker.spawn(async move {
            let reason = match join.await {
                Ok(reason) => reason,
                Err(je) if je.is_panic() => {
                    ExitReason::Panicked(panic_message(je.into_panic().as_ref()).into())
                }
                Err(_aborted) => ExitReason::Cancelled,
            };

            registry.remove(id);
            let ev = match &reason {
                ExitReason::Panicked(msg) => {
                    Event::new(EventKind::ActorPanicked).with_reason(Arc::clone(msg))
                }
                other => Event::new(EventKind::ActorStopped).with_reason(other.as_label()),
            };
            bus.publish(ev.with_actor(Arc::clone(&name)));

            cell.terminate(Terminated { id, name, reason });
        });

        myself
    }

    /// Returns sorted names of actors whose exit has not been observed yet.
    pub fn live(&self) -> Vec<String> {
        self.registry.snapshot()
    }

    /// Number of live actors.
    pub fn live_count(&self) -> usize {
        self.registry.len()
    }

    /// Event bus shared with all actors.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Subscribes to runtime events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Cancels every actor and waits up to `Config::grace` for them to exit.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] and returns [`RuntimeError::GraceExceeded`]
    /// naming the actors still running.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.runtime_token.cancel();
        self.tracker.close();

        let grace = self.cfg.grace;
        match tokio::time::timeout(grace, self.tracker.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_elapsed) => {
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded {
                    grace,
                    stuck: self.registry.snapshot(),
                })
            }
        }
    }

    /// Forwards bus events to the subscriber set (fire-and-forget).
    pub(crate) fn subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "subscriber listener lagged behind the bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
