//! Standardized span constructors for observability.

pub mod spans {
    use crate::state::SessionId;
    use std::net::SocketAddr;
    use tracing::{Span, debug_span, info_span};

    /// Create a span for a client connection.
    pub fn connection(session: SessionId, addr: SocketAddr) -> Span {
        info_span!("connection", session = %session, addr = %addr)
    }

    /// Create a span for a command execution.
    pub fn command(name: &str, source: &str) -> Span {
        debug_span!("command", name = %name, source = %source)
    }
}
