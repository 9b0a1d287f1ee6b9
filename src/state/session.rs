//! Server-side state for one connected client.
//!
//! A `Session` is shared as `Arc<Session>` between its own connection task,
//! the [`Registry`](super::Registry) and any task broadcasting to it. The
//! socket itself never appears here: the read half stays with the
//! connection loop and the write half with a writer task fed by `outbox`.

use super::id::SessionId;
use chat_proto::Reply;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendError, TrySendError};
use tracing::{debug, warn};

/// Outbound queue handle for a session.
pub type Outbox = mpsc::Sender<Arc<Reply>>;

pub struct Session {
    id: SessionId,
    addr: SocketAddr,
    /// Empty until a name is claimed. Written only under the registry lock.
    name: RwLock<String>,
    /// Peers this session does not want to hear from.
    muted: DashMap<SessionId, Weak<Session>>,
    outbox: Outbox,
}

impl Session {
    pub fn new(id: SessionId, addr: SocketAddr, outbox: Outbox) -> Self {
        Self {
            id,
            addr,
            name: RwLock::new(String::new()),
            muted: DashMap::new(),
            outbox,
        }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current display name (empty before login).
    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub(super) fn set_name(&self, name: &str) {
        let mut guard = self.name.write();
        guard.clear();
        guard.push_str(name);
    }

    /// Queue a reply for this client, waiting if the queue is full.
    ///
    /// Used for replies to the session's own commands. Fails only once the
    /// writer task has gone away.
    pub async fn send(&self, reply: Reply) -> Result<(), SendError<Arc<Reply>>> {
        self.outbox.send(Arc::new(reply)).await
    }

    /// Queue a reply without waiting.
    ///
    /// Returns `false` when the delivery was dropped because the client is
    /// not keeping up or has already gone.
    pub fn deliver(&self, reply: Arc<Reply>) -> bool {
        match self.outbox.try_send(reply) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(
                    session = %self.id,
                    addr = %self.addr,
                    "Outbound queue full, dropping delivery"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(session = %self.id, "Outbound queue closed, skipping delivery");
                false
            }
        }
    }

    /// Add `peer` to the mute set. Muting an already-muted peer is a no-op.
    ///
    /// Returns `true` if the peer was not muted before.
    pub fn mute(&self, peer: &Arc<Session>) -> bool {
        self.muted.insert(peer.id, Arc::downgrade(peer)).is_none()
    }

    /// Whether messages authored by `peer` are suppressed for this session.
    #[inline]
    pub fn is_muting(&self, peer: SessionId) -> bool {
        self.muted.contains_key(&peer)
    }

    /// Names of muted peers that are still connected, sorted.
    ///
    /// Entries for peers that have gone away are dropped on the way.
    pub fn muted_names(&self) -> Vec<String> {
        self.muted.retain(|_, peer| peer.strong_count() > 0);
        let mut names: Vec<String> = self
            .muted
            .iter()
            .filter_map(|entry| entry.value().upgrade())
            .map(|peer| peer.name())
            .collect();
        names.sort();
        names
    }

    pub fn muted_count(&self) -> usize {
        self.muted.len()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("name", &*self.name.read())
            .field("muted", &self.muted.len())
            .finish()
    }
}
