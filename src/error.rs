//! Error types used by the devicegroup runtime and its handles.
//!
//! This module defines three enums:
//!
//! - [`RuntimeError`] errors raised by the actor runtime itself.
//! - [`SendError`] a `tell` addressed to an actor whose mailbox is gone.
//! - [`AskError`] request/reply helpers that did not get their reply.
//!
//! Message handling inside the group and device actors never produces errors:
//! mis-addressed or duplicate requests are routing no-ops, and worker failure is
//! observed structurally through termination notifications.
//!
//! All types provide `as_label` / `as_message` helpers for logging.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// # Errors produced by the actor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some actors were still running.
    #[error("shutdown timeout {grace:?} exceeded; stuck: {stuck:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of actors that did not stop in time.
        stuck: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use devicegroup::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck actors={stuck:?}")
            }
        }
    }
}

/// # Delivery failure for a fire-and-forget message.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The addressee has stopped and its mailbox is closed.
    #[error("actor {actor} is stopped")]
    Stopped {
        /// Name of the addressed actor.
        actor: Arc<str>,
    },
}

impl SendError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SendError::Stopped { .. } => "send_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SendError::Stopped { actor } => format!("mailbox closed: {actor}"),
        }
    }
}

/// # Failure of a request/reply exchange.
///
/// `NoReply` means the addressee processed (or discarded) the request and
/// dropped the reply channel without answering. For a group that is how a
/// mis-addressed tracking request looks from the asking side.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AskError {
    /// The addressee was already stopped when the request was sent.
    #[error("actor {actor} is stopped")]
    Stopped {
        /// Name of the addressed actor.
        actor: Arc<str>,
    },

    /// The reply channel was dropped without a reply.
    #[error("actor {actor} dropped the request without replying")]
    NoReply {
        /// Name of the addressed actor.
        actor: Arc<str>,
    },

    /// No reply arrived within the caller's timeout.
    #[error("no reply from {actor} within {timeout:?}")]
    Timeout {
        /// Name of the addressed actor.
        actor: Arc<str>,
        /// The timeout that elapsed.
        timeout: Duration,
    },
}

impl AskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use devicegroup::AskError;
    /// use std::time::Duration;
    ///
    /// let err = AskError::Timeout { actor: "group:a".into(), timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "ask_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AskError::Stopped { .. } => "ask_stopped",
            AskError::NoReply { .. } => "ask_no_reply",
            AskError::Timeout { .. } => "ask_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            AskError::Stopped { actor } => format!("stopped: {actor}"),
            AskError::NoReply { actor } => format!("no reply: {actor}"),
            AskError::Timeout { actor, timeout } => format!("timeout: {actor} after {timeout:?}"),
        }
    }
}

impl From<SendError> for AskError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Stopped { actor } => AskError::Stopped { actor },
        }
    }
}
