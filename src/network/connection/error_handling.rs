//! Why a connection ended, and the status lines for protocol errors.

use chat_proto::{ProtocolError, Reply};
use thiserror::Error;

/// Reason a connection left the login or read/dispatch loop.
#[derive(Debug, Error)]
pub(super) enum Disconnect {
    /// `!exit`: name already released and departure already announced.
    #[error("client quit")]
    Quit,
    #[error("connection closed by peer")]
    Eof,
    #[error("read error: {0}")]
    Read(#[from] ProtocolError),
    /// The writer task stopped, so nothing more can reach the client.
    #[error("outbound queue closed")]
    WriterGone,
}

impl Disconnect {
    /// Whether the client left on purpose.
    pub(super) fn is_explicit(&self) -> bool {
        matches!(self, Disconnect::Quit)
    }
}

/// Status line for an input line that exceeded the size limit.
pub(super) fn input_too_long_reply(limit: usize) -> Reply {
    Reply::status(format!("Message exceeds maximum size of {limit} bytes"))
}
