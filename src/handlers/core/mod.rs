//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the handler table, the context passed to handlers and the
//! handler error type.

pub mod commands;
pub mod context;

// Re-export commonly used types
pub use commands::Commands;
pub use context::{Context, Handler, HandlerError, HandlerResult};
