//! Message fan-out.
//!
//! Fan-out snapshots the registry and then queues one reply per recipient
//! with a non-blocking send. Each recipient has its own bounded queue
//! drained by its own writer task, so a stalled client only loses its own
//! deliveries and never holds up the sender or anybody else.

use super::registry::Registry;
use super::session::Session;
use chat_proto::Reply;
use std::sync::Arc;
use tracing::trace;

impl Registry {
    /// Deliver chat `text` authored by `sender`.
    ///
    /// Skips the sender itself and every session that has muted the sender.
    /// Returns the number of recipients the message was queued for.
    pub fn broadcast_from(&self, sender: &Session, text: &str) -> usize {
        let reply = Arc::new(Reply::chat(sender.name(), text));
        let mut delivered = 0;

        for recipient in self.snapshot_all() {
            if recipient.id() == sender.id() || recipient.is_muting(sender.id()) {
                continue;
            }
            if recipient.deliver(Arc::clone(&reply)) {
                delivered += 1;
            }
        }

        trace!(from = %sender.id(), delivered, "Chat fan-out");
        delivered
    }

    /// Deliver an announcement with no author to every registered session.
    pub fn broadcast_system(&self, text: &str) -> usize {
        let reply = Arc::new(Reply::system(text));
        let delivered = self
            .snapshot_all()
            .iter()
            .filter(|recipient| recipient.deliver(Arc::clone(&reply)))
            .count();

        trace!(delivered, "System fan-out");
        delivered
    }
}
