//! Server-to-client replies and their rendering.
//!
//! A [`Reply`] is the abstract message; [`Style`] decides whether it goes out
//! as plain text or decorated with ANSI escape sequences for terminal
//! clients such as `telnet` or `nc`.

use std::fmt;

/// Help banner sent after login and on `!help`.
pub const HELP_TEXT: &str = "--------------------
!exit        to exit
!list        to list users
!rename NAME to change username
!mute USER   to mute/unmute USER
!muted       to list muted users
!help        for this help message
--------------------

";

/// Login prompt. Not newline-terminated.
pub const PROMPT: &str = "Username: ";

const BOLD: &str = "\x1b[1m";
const INVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";
const SAVE_CURSOR: &str = "\x1b[s";
const RESTORE_CURSOR: &str = "\x1b[u";
const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K";

/// Output decoration mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Bare text lines.
    #[default]
    Plain,
    /// Bold sender names, reverse-video markers, cursor save/restore.
    Ansi,
}

/// A message from the server to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `Username: ` login prompt.
    Prompt,
    /// The multi-line help banner.
    Help,
    /// Chat text authored by another user.
    Chat {
        /// Display name of the author.
        from: String,
        /// Message body.
        text: String,
    },
    /// Announcement with no author (joins, departures, renames).
    System(String),
    /// One row of a `!list` or `!muted` listing.
    Entry(String),
    /// Single-line status or error message for the requesting client.
    Status(String),
    /// Erase the line the client just typed. Renders to nothing in plain style.
    EraseLine,
}

impl Reply {
    /// Build a chat reply.
    pub fn chat(from: impl Into<String>, text: impl Into<String>) -> Self {
        Reply::Chat {
            from: from.into(),
            text: text.into(),
        }
    }

    /// Build a system announcement.
    pub fn system(text: impl Into<String>) -> Self {
        Reply::System(text.into())
    }

    /// Build a listing row.
    pub fn entry(name: impl Into<String>) -> Self {
        Reply::Entry(name.into())
    }

    /// Build a status line.
    pub fn status(text: impl Into<String>) -> Self {
        Reply::Status(text.into())
    }

    /// Render the reply to wire text, terminator included.
    pub fn render(&self, style: Style) -> String {
        match (self, style) {
            (Reply::Prompt, _) => PROMPT.to_string(),
            (Reply::Help, _) => HELP_TEXT.to_string(),
            (Reply::Status(text), _) => format!("{text}\n"),

            (Reply::Chat { from, text }, Style::Plain) => format!("{from}: {text}\n"),
            (Reply::Chat { from, text }, Style::Ansi) => {
                format!("{SAVE_CURSOR}>> {BOLD}{from}{RESET}: {text}{RESTORE_CURSOR}\n")
            }

            (Reply::System(text), Style::Plain) => format!("!! {text}\n"),
            (Reply::System(text), Style::Ansi) => format!("{INVERSE}!!{RESET} {text}\n"),

            (Reply::Entry(name), Style::Plain) => format!("| {name}\n"),
            (Reply::Entry(name), Style::Ansi) => format!("{INVERSE}|{RESET} {name}\n"),

            (Reply::EraseLine, Style::Plain) => String::new(),
            (Reply::EraseLine, Style::Ansi) => ERASE_PREVIOUS_LINE.to_string(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Style::Plain))
    }
}
