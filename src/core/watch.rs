//! # Termination watch: per-actor registration table.
//!
//! Every spawned actor owns one [`WatchCell`]. Other actors register interest in
//! its termination through [`Context::watch`](crate::Context::watch); the exit
//! supervisor of the watched actor calls [`WatchCell::terminate`] once its task
//! has exited, which hands a [`Terminated`] to every registered watcher.
//!
//! ## Architecture
//! ```text
//! Group ── ctx.watch(&device) ──► WatchCell(device) ── Alive { watchers }
//!                                        │
//!          device task exits ──► exit supervisor ──► terminate(Terminated)
//!                                        │
//!                  ┌─────────────────────┘
//!                  ▼
//!   notify(watcher) ─► Group mailbox ◄─ GroupMsg::WorkerTerminated(Terminated)
//! ```
//!
//! ## Rules
//! - A cell terminates **exactly once**; later `terminate` calls are no-ops.
//! - Watching an already-terminated actor notifies **immediately**.
//! - Each watcher is notified **at most once** per watched actor.
//! - Notifiers run **outside** the cell lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::handle::ActorId;

/// How an actor task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The actor was stopped (`ActorRef::stop` or `Context::stop`).
    Stopped,
    /// The actor's cancellation token fired (parent stopped or system shutdown).
    Cancelled,
    /// The actor task panicked; carries the panic message.
    Panicked(Arc<str>),
}

impl ExitReason {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ExitReason::Stopped => "stopped",
            ExitReason::Cancelled => "cancelled",
            ExitReason::Panicked(_) => "panicked",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Panicked(msg) => write!(f, "panicked: {msg}"),
            other => f.write_str(other.as_label()),
        }
    }
}

/// Notification delivered to watchers once a watched actor has stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminated {
    /// Id of the actor that stopped.
    pub id: ActorId,
    /// Name of the actor that stopped.
    pub name: Arc<str>,
    /// Why it stopped.
    pub reason: ExitReason,
}

pub(crate) type Notifier = Box<dyn FnOnce(Terminated) + Send>;

enum WatchState {
    Alive(HashMap<ActorId, Notifier>),
    Terminated(Terminated),
}

/// Registration table of watchers for one actor.
pub(crate) struct WatchCell {
    state: Mutex<WatchState>,
}

impl WatchCell {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(WatchState::Alive(HashMap::new())),
        }
    }

    /// Registers `notify` for `watcher`, replacing an earlier registration by the same watcher.
    ///
    /// If the actor has already terminated, `notify` runs immediately on the caller.
    pub(crate) fn watch(&self, watcher: ActorId, notify: Notifier) {
        let terminated = {
            let mut state = self.state.lock();
            match &mut *state {
                WatchState::Alive(watchers) => {
                    watchers.insert(watcher, notify);
                    return;
                }
                WatchState::Terminated(t) => t.clone(),
            }
        };
        notify(terminated);
    }

    /// Removes the registration of `watcher`; returns whether one existed.
    pub(crate) fn unwatch(&self, watcher: ActorId) -> bool {
        match &mut *self.state.lock() {
            WatchState::Alive(watchers) => watchers.remove(&watcher).is_some(),
            WatchState::Terminated(_) => false,
        }
    }

    /// Marks the actor terminated and notifies all registered watchers.
    pub(crate) fn terminate(&self, terminated: Terminated) {
        let watchers = {
            let mut state = self.state.lock();
            if matches!(&*state, WatchState::Terminated(_)) {
                return;
            }
            match std::mem::replace(&mut *state, WatchState::Terminated(terminated.clone())) {
                WatchState::Alive(watchers) => watchers,
                WatchState::Terminated(_) => return,
            }
        };
        for (_, notify) in watchers {
            notify(terminated.clone());
        }
    }

    pub(crate) fn is_terminated(&self) -> bool {
        matches!(&*self.state.lock(), WatchState::Terminated(_))
    }

    /// Exit reason recorded at termination; `None` while the actor runs.
    pub(crate) fn exit_reason(&self) -> Option<ExitReason> {
        match &*self.state.lock() {
            WatchState::Alive(_) => None,
            WatchState::Terminated(t) => Some(t.reason.clone()),
        }
    }
}
