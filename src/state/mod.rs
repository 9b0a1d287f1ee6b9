//! State management module.
//!
//! Contains the Hub (shared server state), the name registry, sessions and
//! the broadcast engine.

mod broadcast;
mod hub;
mod id;
mod registry;
mod session;

pub use hub::Hub;
pub use id::{SessionId, SessionIdGenerator};
pub use registry::{ClaimError, RESERVED_NAME_CHARS, Registry, validate_name};
pub use session::{Outbox, Session};

#[cfg(test)]
pub(crate) use session::test_support;
