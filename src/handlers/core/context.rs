//! Command handler context and core types.
//!
//! Defines the `Context<'a>` struct passed to all handlers, the `Handler`
//! trait, and the error type handlers return.

use crate::state::{ClaimError, Hub, Session};
use async_trait::async_trait;
use chat_proto::{InputError, Reply, Verb};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::error::SendError;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The session that issued the command.
    pub session: &'a Arc<Session>,
    /// Shared server state.
    pub hub: &'a Arc<Hub>,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a Arc<Session>, hub: &'a Arc<Hub>) -> Self {
        Self { session, hub }
    }

    /// Queue a reply for the issuing client.
    #[inline]
    pub async fn reply(&self, reply: Reply) -> HandlerResult {
        self.session.send(reply).await?;
        Ok(())
    }
}

/// A command handler.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Run the command. `args` are the space-separated words after the keyword.
    async fn handle(&self, ctx: &Context<'_>, args: &[&str]) -> HandlerResult;
}

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("wrong number of arguments for {0}")]
    BadArity(Verb),
    #[error("no such user: {0}")]
    NoSuchUser(String),
    #[error("cannot rename: {0}")]
    Rename(#[source] ClaimError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("send error: {0}")]
    Send(#[from] SendError<Arc<Reply>>),
    /// The client asked to leave (`!exit`); its name is already released.
    #[error("client quit")]
    Quit,
    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadArity(_) => "bad_arity",
            Self::NoSuchUser(_) => "no_such_user",
            Self::Rename(_) => "rename_refused",
            Self::Input(_) => "embedded_newline",
            Self::Send(_) => "send_error",
            Self::Quit => "quit",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Convert to a status line for the issuing client.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply
    /// (send failures, quit, internal errors).
    pub fn to_reply(&self) -> Option<Reply> {
        let text = match self {
            Self::BadArity(Verb::Mute) | Self::NoSuchUser(_) => "Failed to mute user",
            Self::BadArity(Verb::Rename) | Self::Rename(_) => "Failed to change name",
            Self::BadArity(_) => "Wrong number of arguments",
            Self::Input(_) => "Message must not contain newline characters",

            Self::Send(_) => return None,
            Self::Quit => return None,
            Self::Internal(_) => return None,
        };
        Some(Reply::status(text))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
