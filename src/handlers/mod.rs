//! Chat command handlers.
//!
//! This module contains the Handler trait and the command table that
//! dispatches each input line to a handler, or to the broadcast engine when
//! the line is plain chat.

mod core;
mod exit;
mod help;
mod list;
mod messaging;
mod mute;
mod rename;

pub use self::core::{Commands, Context, Handler, HandlerError, HandlerResult};

#[cfg(test)]
pub(crate) use self::core::testing;
