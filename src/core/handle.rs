//! # Actor handles and reply channels.
//!
//! - [`ActorId`] process-unique identity assigned at spawn;
//! - [`ActorRef`] addressable, cloneable handle to a running actor;
//! - [`ReplyTo`] caller-supplied channel a request is answered on.
//!
//! ## Rules
//! - Handles compare and hash by [`ActorId`] only. Two handles are equal iff
//!   they address the same spawned actor.
//! - A handle carries **no ownership**: dropping every handle does not stop the
//!   actor, and holding one does not keep it alive.
//! - `tell` never blocks (mailboxes are unbounded).
//! - `stop` is ordered: it is processed after every message sent before it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;

use super::actor::Actor;
use super::watch::{ExitReason, WatchCell};
use crate::error::{AskError, SendError};

/// Global id counter; ids start at 1.
static ACTOR_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique actor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    pub(crate) fn next() -> Self {
        Self(ACTOR_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mailbox item.
pub(crate) enum Envelope<M> {
    Message(M),
    Stop,
}

/// Addressable handle to a running actor.
pub struct ActorRef<A: Actor> {
    id: ActorId,
    name: Arc<str>,
    tx: mpsc::UnboundedSender<Envelope<A::Msg>>,
    cell: Arc<WatchCell>,
    default_timeout: Option<Duration>,
}

impl<A: Actor> ActorRef<A> {
    pub(crate) fn new(
        id: ActorId,
        name: Arc<str>,
        tx: mpsc::UnboundedSender<Envelope<A::Msg>>,
        cell: Arc<WatchCell>,
        default_timeout: Option<Duration>,
    ) -> Self {
        Self {
            id,
            name,
            tx,
            cell,
            default_timeout,
        }
    }

    /// Returns the actor's id.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the actor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueues a message without waiting for it to be processed.
    pub fn tell(&self, msg: A::Msg) -> Result<(), SendError> {
        self.tx
            .send(Envelope::Message(msg))
            .map_err(|_| SendError::Stopped {
                actor: Arc::clone(&self.name),
            })
    }

    /// Asks the actor to stop once it has processed everything already queued.
    ///
    /// Stopping an actor that is already gone is a no-op.
    pub fn stop(&self) {
        let _ = self.tx.send(Envelope::Stop);
    }

    /// True once the actor's exit has been observed by the runtime.
    pub fn is_terminated(&self) -> bool {
        self.cell.is_terminated()
    }

    /// How the actor ended, once its exit has been observed.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.cell.exit_reason()
    }

    /// Sends the message built by `make` and waits for its reply.
    ///
    /// Fails with [`AskError::NoReply`] if the actor drops the reply channel
    /// without answering, including when it stops with the request still queued.
    pub async fn ask<R, F>(&self, make: F) -> Result<R, AskError>
    where
        F: FnOnce(ReplyTo<R>) -> A::Msg,
    {
        let (reply_to, mut rx) = reply_channel();
        self.tell(make(reply_to))?;
        rx.recv().await.ok_or_else(|| AskError::NoReply {
            actor: Arc::clone(&self.name),
        })
    }

    /// Like [`ask`](Self::ask) with a deadline; `None` waits indefinitely.
    pub async fn ask_timeout<R, F>(&self, timeout: Option<Duration>, make: F) -> Result<R, AskError>
    where
        F: FnOnce(ReplyTo<R>) -> A::Msg,
    {
        let Some(dur) = timeout else {
            return self.ask(make).await;
        };
        tokio::time::timeout(dur, self.ask(make))
            .await
            .map_err(|_elapsed| AskError::Timeout {
                actor: Arc::clone(&self.name),
                timeout: dur,
            })?
    }

    /// Deadline used by the typed ask helpers (from `Config::ask_timeout` at spawn).
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    pub(crate) fn cell(&self) -> &WatchCell {
        &self.cell
    }

    pub(crate) fn sender(&self) -> mpsc::UnboundedSender<Envelope<A::Msg>> {
        self.tx.clone()
    }
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            tx: self.tx.clone(),
            cell: Arc::clone(&self.cell),
            default_timeout: self.default_timeout,
        }
    }
}

impl<A: Actor> PartialEq for ActorRef<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A: Actor> Eq for ActorRef<A> {}

impl<A: Actor> Hash for ActorRef<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A: Actor> fmt::Debug for ActorRef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Channel a request's reply is delivered on.
///
/// Callers keep the receiving end (and may keep a clone of this sender, so that
/// a request that is never answered shows up as silence rather than a closed
/// channel).
pub struct ReplyTo<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> ReplyTo<T> {
    /// Delivers `msg`; silently dropped if the caller is no longer listening.
    pub fn tell(&self, msg: T) {
        let _ = self.tx.send(msg);
    }
}

impl<T> Clone for ReplyTo<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> fmt::Debug for ReplyTo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyTo")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<T> From<mpsc::UnboundedSender<T>> for ReplyTo<T> {
    fn from(tx: mpsc::UnboundedSender<T>) -> Self {
        Self { tx }
    }
}

/// Creates a reply channel.
pub fn reply_channel<T>() -> (ReplyTo<T>, mpsc::UnboundedReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ReplyTo { tx }, rx)
}
