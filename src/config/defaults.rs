//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

pub fn default_server_name() -> String {
    "chatterd".to_string()
}

// =============================================================================
// Limits Defaults
// =============================================================================

pub fn default_max_message_size() -> usize {
    1024
}

pub fn default_outbox_capacity() -> usize {
    256
}

pub fn default_linger_ms() -> u64 {
    2000
}
