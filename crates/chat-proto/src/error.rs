//! Error types for the chat protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level protocol errors.
///
/// Oversized lines and bad UTF-8 are not errors at this level: the codec
/// reports the former as [`crate::Inbound::Overflow`] and decodes the latter
/// lossily, so only a broken stream ends a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while classifying a single client line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// A carriage return or newline survived terminator stripping.
    #[error("message must not contain newline characters")]
    EmbeddedTerminator,
}
