//! # Actor: message-driven component with private, serialized state.
//!
//! An [`Actor`] owns its state exclusively and processes one message at a time,
//! in arrival order, from its private mailbox. There is no locking around actor
//! state: the mailbox loop is the single writer.
//!
//! ## Architecture
//! ```text
//! System::spawn(actor) ──► mailbox (unbounded mpsc) ──► run_actor()
//!
//! started()
//! loop {
//!   ├─► ctx.stop() requested?          → exit Stopped
//!   ├─► select (biased):
//!   │     ├─ token cancelled           → exit Cancelled
//!   │     └─ mailbox.recv()
//!   │          ├─ Message(msg)         → handle(msg)
//!   │          └─ Stop                 → exit Stopped
//! }
//! stopped()
//! drop guard cancels the token        → children are cancelled
//! ```
//!
//! ## Rules
//! - Messages are handled **sequentially** (never concurrent for one actor).
//! - Cancellation is observed **between** messages, never inside `handle`.
//! - Children spawned through [`Context::spawn`] derive their token from the
//!   parent's, so they are cancelled when the parent exits (even on panic).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::handle::{ActorRef, Envelope};
use super::system::System;
use super::watch::{ExitReason, Terminated};
use crate::config::Config;
use crate::events::Bus;

/// # Message-driven component with private state.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use devicegroup::{Actor, Context, ReplyTo};
///
/// struct Counter(u64);
///
/// enum CounterMsg {
///     Add(u64),
///     Get(ReplyTo<u64>),
/// }
///
/// #[async_trait]
/// impl Actor for Counter {
///     type Msg = CounterMsg;
///
///     async fn handle(&mut self, msg: CounterMsg, _ctx: &mut Context<Self>) {
///         match msg {
///             CounterMsg::Add(n) => self.0 += n,
///             CounterMsg::Get(reply_to) => reply_to.tell(self.0),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Actor: Send + Sized + 'static {
    /// Messages accepted by this actor's mailbox.
    type Msg: Send + 'static;

    /// Human-readable name (for logs, events and shutdown reports).
    fn name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Runs once before the first message.
    async fn started(&mut self, _ctx: &mut Context<Self>) {}

    /// Handles a single message.
    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>);

    /// Runs once after the mailbox loop exits (not on panic).
    async fn stopped(&mut self, _ctx: &mut Context<Self>) {}
}

/// Per-actor execution context passed to every hook.
pub struct Context<A: Actor> {
    myself: ActorRef<A>,
    token: CancellationToken,
    system: Arc<System>,
    stopping: bool,
}

impl<A: Actor> Context<A> {
    pub(crate) fn new(myself: ActorRef<A>, token: CancellationToken, system: Arc<System>) -> Self {
        Self {
            myself,
            token,
            system,
            stopping: false,
        }
    }

    /// Handle to this actor.
    pub fn myself(&self) -> &ActorRef<A> {
        &self.myself
    }

    /// Spawns a child actor; it is cancelled when this actor exits.
    pub fn spawn<B: Actor>(&self, actor: B) -> ActorRef<B> {
        self.system.spawn_with_token(actor, self.token.child_token())
    }

    /// Registers interest in `other`'s termination.
    ///
    /// When `other` stops, a [`Terminated`] converted into `A::Msg` is enqueued
    /// in this actor's mailbox like any other message. If `other` has already
    /// stopped, the notification is enqueued right away.
    pub fn watch<B: Actor>(&self, other: &ActorRef<B>)
    where
        A::Msg: From<Terminated>,
    {
        let tx = self.myself.sender();
        other.cell().watch(
            self.myself.id(),
            Box::new(move |terminated| {
                let _ = tx.send(Envelope::Message(A::Msg::from(terminated)));
            }),
        );
    }

    /// Drops a previous [`watch`](Self::watch); returns whether one was registered.
    ///
    /// A notification already enqueued is not recalled.
    pub fn unwatch<B: Actor>(&self, other: &ActorRef<B>) -> bool {
        other.cell().unwatch(self.myself.id())
    }

    /// Stops this actor once the current message has been handled.
    pub fn stop(&mut self) {
        self.stopping = true;
    }

    /// Event bus shared by the whole system.
    pub fn bus(&self) -> &Bus {
        self.system.bus()
    }

    /// System configuration.
    pub fn config(&self) -> &Config {
        self.system.config()
    }

    /// This actor's cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Runs the mailbox loop of one actor until stop, cancellation or panic.
pub(crate) async fn run_actor<A: Actor>(
    mut actor: A,
    mut mailbox: mpsc::UnboundedReceiver<Envelope<A::Msg>>,
    mut ctx: Context<A>,
) -> ExitReason {
    let token = ctx.token.clone();
    let _children = token.clone().drop_guard();

    actor.started(&mut ctx).await;

    let reason = loop {
        if ctx.stopping {
            break ExitReason::Stopped;
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => break ExitReason::Cancelled,
            envelope = mailbox.recv() => match envelope {
                Some(Envelope::Message(msg)) => actor.handle(msg, &mut ctx).await,
                Some(Envelope::Stop) | None => break ExitReason::Stopped,
            },
        }
    };

    actor.stopped(&mut ctx).await;
    reason
}
