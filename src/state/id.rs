//! Session identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a session.
///
/// Mute sets compare identities rather than names, so a muted peer stays
/// muted across renames. Ids are never reused, so an entry for a departed
/// peer can never match a newcomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:06}", self.0)
    }
}

/// Generates unique session ids.
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        SessionId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
