//! Hub - the shared state handed to every connection.

use super::id::SessionIdGenerator;
use super::registry::Registry;
use super::session::{Outbox, Session};
use crate::config::{Config, LimitsConfig};
use chat_proto::Style;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Shared server state.
///
/// Built once by `main` (or per test) and passed around as `Arc<Hub>`.
/// Independent hubs do not see each other's users.
pub struct Hub {
    pub registry: Registry,
    pub ids: SessionIdGenerator,
    pub limits: LimitsConfig,
    /// Output decoration for every connection.
    pub style: Style,
    /// Announce departures caused by transport failure, not just `!exit`.
    pub announce_disconnects: bool,
}

impl Hub {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Registry::new(),
            ids: SessionIdGenerator::new(),
            limits: config.limits.clone(),
            style: if config.display.ansi {
                Style::Ansi
            } else {
                Style::Plain
            },
            announce_disconnects: config.server.announce_disconnects,
        }
    }

    /// Create an unregistered session with a fresh id.
    pub fn new_session(&self, addr: SocketAddr, outbox: Outbox) -> Arc<Session> {
        Arc::new(Session::new(self.ids.next(), addr, outbox))
    }

    /// Grace period for flushing a closing connection's queue.
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.limits.linger_ms)
    }
}
