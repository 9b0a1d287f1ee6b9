//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines with a hard size limit and writes
//! [`Reply`] values rendered in the configured [`Style`].

use std::borrow::Borrow;

use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::reply::{Reply, Style};

/// Default maximum line length, terminator excluded.
pub const DEFAULT_MAX_LEN: usize = 1024;

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A complete line, terminator included.
    Line(String),
    /// A line longer than the limit was received and discarded.
    Overflow {
        /// The limit that was exceeded.
        limit: usize,
    },
}

/// Newline codec that survives oversized input.
///
/// The limit applies to the line body; a trailing `\n` or `\r\n` does not
/// count against it. When a line exceeds the limit the codec yields a single
/// [`Inbound::Overflow`] and drops bytes up to and including the next
/// newline, so the stream stays usable.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum body length
    max_len: usize,
    /// Dropping the tail of an oversized line
    discarding: bool,
    style: Style,
}

impl LineCodec {
    /// Create a codec with the default limit and plain output.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Create a codec with a custom max body length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
            style: Style::Plain,
        }
    }

    /// Set the output style used by the encoder.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = Inbound;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Inbound>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }
                // A partial line already past the limit can never become valid.
                // A trailing '\r' may still turn out to be part of the terminator.
                let pending = src.len() - usize::from(src.last() == Some(&b'\r'));
                if pending > self.max_len {
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Ok(Some(Inbound::Overflow {
                        limit: self.max_len,
                    }));
                }
                self.next_index = src.len();
                return Ok(None);
            };

            let end = self.next_index + offset + 1;
            self.next_index = 0;

            if self.discarding {
                src.advance(end);
                self.discarding = false;
                continue;
            }

            let line = src.split_to(end);
            if body_len(&line) > self.max_len {
                return Ok(Some(Inbound::Overflow {
                    limit: self.max_len,
                }));
            }

            return Ok(Some(Inbound::Line(
                String::from_utf8_lossy(&line).into_owned(),
            )));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Inbound>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() || self.discarding {
            src.clear();
            return Ok(None);
        }
        // Peer closed mid-line: hand over what arrived
        let rest = src.split();
        self.next_index = 0;
        Ok(Some(Inbound::Line(
            String::from_utf8_lossy(&rest).into_owned(),
        )))
    }
}

/// Length of `line` without its `\n` or `\r\n` terminator.
fn body_len(line: &[u8]) -> usize {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line).len()
}

impl<T> Encoder<T> for LineCodec
where
    T: Borrow<Reply>,
{
    type Error = error::ProtocolError;

    fn encode(&mut self, reply: T, dst: &mut BytesMut) -> error::Result<()> {
        let text = reply.borrow().render(self.style);
        dst.extend_from_slice(text.as_bytes());
        Ok(())
    }
}
