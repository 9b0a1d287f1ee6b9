//! # chat-proto
//!
//! Wire protocol for the chatterd line-oriented chat server.
//!
//! ## Features
//!
//! - Newline framing with a hard per-line size limit that recovers from
//!   oversized input instead of tearing the stream down
//! - Classification of client lines into commands (`!mute bob`) or chat text
//! - Server replies rendered either as plain text or with ANSI decoration
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_proto::{Input, Reply, Style, Verb, parse_input};
//!
//! let input = parse_input("!mute bob\r\n").expect("no embedded newline");
//! assert_eq!(input, Input::Command { verb: Verb::Mute, args: vec!["bob"] });
//!
//! let line = Reply::chat("alice", "hello").render(Style::Plain);
//! assert_eq!(line, "alice: hello\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod input;
#[cfg(feature = "tokio")]
pub mod line;
pub mod reply;

pub use self::error::{InputError, ProtocolError};
pub use self::input::{parse_input, strip_terminator, Input, Verb};
#[cfg(feature = "tokio")]
pub use self::line::{Inbound, LineCodec};
pub use self::reply::{Reply, Style, HELP_TEXT, PROMPT};
