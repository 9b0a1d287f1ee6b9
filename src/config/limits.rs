//! Per-connection limits configuration.

use super::defaults::{default_linger_ms, default_max_message_size, default_outbox_capacity};
use serde::Deserialize;

/// Per-connection limits.
///
/// These bound how much memory one client can pin: the longest line it may
/// send, and how many outbound lines may queue up while it is not reading.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum input line size in bytes, `\n` or `\r\n` excluded (default: 1024).
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
    /// Outbound queue capacity per session (default: 256).
    /// Broadcasts to a client whose queue is full are dropped for that client.
    #[serde(default = "default_outbox_capacity")]
    pub outbox_capacity: usize,
    /// How long a closing connection may spend flushing its queue, in
    /// milliseconds (default: 2000).
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_size: default_max_message_size(),
            outbox_capacity: default_outbox_capacity(),
            linger_ms: default_linger_ms(),
        }
    }
}
