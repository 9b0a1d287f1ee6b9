//! Classification of client input lines.
//!
//! Every line a logged-in client sends is either a command (`!list`,
//! `!mute bob`) or chat text to be broadcast. Keywords without arguments
//! only match when they make up the whole line; keywords that take
//! arguments match as the first space-delimited token.

use std::fmt;

use crate::error::InputError;

/// A command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `!help`: show the command summary.
    Help,
    /// `!list`: enumerate connected users.
    List,
    /// `!mute <name>`: stop receiving messages from a user.
    Mute,
    /// `!muted`: enumerate muted users.
    Muted,
    /// `!rename <name>`: change display name.
    Rename,
    /// `!exit`: leave the chat.
    Exit,
}

impl Verb {
    /// Every verb, in help-banner order.
    pub const ALL: [Verb; 6] = [
        Verb::Exit,
        Verb::List,
        Verb::Rename,
        Verb::Mute,
        Verb::Muted,
        Verb::Help,
    ];

    /// The literal keyword, including the leading `!`.
    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Help => "!help",
            Verb::List => "!list",
            Verb::Mute => "!mute",
            Verb::Muted => "!muted",
            Verb::Rename => "!rename",
            Verb::Exit => "!exit",
        }
    }

    /// Whether the verb is followed by arguments.
    pub fn takes_args(self) -> bool {
        matches!(self, Verb::Mute | Verb::Rename)
    }

    /// Look up a verb by its exact keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.keyword() == word)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// Nothing left after stripping the terminator.
    Empty,
    /// A command keyword and its space-separated arguments.
    Command {
        /// The command.
        verb: Verb,
        /// Arguments split on single spaces (empty strings preserved).
        args: Vec<&'a str>,
    },
    /// Anything else: text to broadcast.
    Chat(&'a str),
}

/// Remove one trailing `\n` and then one trailing `\r`.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classify a raw line as read from the wire.
///
/// Returns [`InputError::EmbeddedTerminator`] if a `\r` or `\n` remains
/// after the record terminator is stripped.
pub fn parse_input(raw: &str) -> Result<Input<'_>, InputError> {
    let body = strip_terminator(raw);
    if body.is_empty() {
        return Ok(Input::Empty);
    }
    if body.contains(['\r', '\n']) {
        return Err(InputError::EmbeddedTerminator);
    }

    let mut parts = body.split(' ');
    let first = parts.next().unwrap_or_default();

    match Verb::from_keyword(first) {
        Some(verb) if verb.takes_args() => Ok(Input::Command {
            verb,
            args: parts.collect(),
        }),
        Some(verb) if first.len() == body.len() => Ok(Input::Command {
            verb,
            args: Vec::new(),
        }),
        _ => Ok(Input::Chat(body)),
    }
}
