//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, DisplayConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup sanity checks

mod defaults;
mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, DisplayConfig, ServerConfig};
pub use validation::{ValidationError, validate};
