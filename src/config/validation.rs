//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("limits.max_message_size must be greater than 0")]
    ZeroMessageSize,
    #[error("limits.outbox_capacity must be greater than 0")]
    ZeroOutboxCapacity,
    #[error("server.name is required")]
    MissingServerName,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    }
    if config.limits.max_message_size == 0 {
        errors.push(ValidationError::ZeroMessageSize);
    }
    // tokio's mpsc::channel panics on a zero capacity
    if config.limits.outbox_capacity == 0 {
        errors.push(ValidationError::ZeroOutboxCapacity);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
