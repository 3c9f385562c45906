//! Runtime core: actors, handles, termination watch, supervision.
//!
//! The public surface is [`System`] (spawn, shutdown), the [`Actor`] trait with
//! its [`Context`], handles ([`ActorRef`], [`ReplyTo`]) and the watch
//! notification types ([`Terminated`], [`ExitReason`]).
//!
//! Internal modules:
//! - `actor`: actor trait, context and the mailbox loop;
//! - `handle`: actor ids, handles, reply channels;
//! - `watch`: per-actor registration table for termination notifications;
//! - `registry`: table of live actors;
//! - `system`: spawn path, exit supervision and graceful shutdown;
//! - `builder`: system construction.

mod actor;
mod builder;
mod handle;
mod registry;
mod system;
mod watch;

pub use actor::{Actor, Context};
pub use builder::SystemBuilder;
pub use handle::{ActorId, ActorRef, ReplyTo, reply_channel};
pub use system::System;
pub use watch::{ExitReason, Terminated};

pub(crate) use system::panic_message;

#[cfg(test)]
mod tests;
