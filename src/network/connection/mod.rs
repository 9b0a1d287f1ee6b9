//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task, with a second task owning the
//! socket's write half:
//!
//! ```text
//! Phase 1: Login (prompt until a name is claimed)
//!    ↓
//! Phase 2: Read/dispatch loop
//!    ┌──────────────────────────────────────────────┐
//!    │  FramedRead ──▶ [Commands] ──▶ own outbox    │
//!    │                     │                        │
//!    │                     └──▶ Registry ──▶ other  │
//!    │                          (broadcast)  outboxes│
//!    └──────────────────────────────────────────────┘
//!    ↓
//! Teardown: release name, announce, drain outbox (bounded by linger)
//!
//! Writer task: outbox ──▶ FramedWrite ──▶ socket
//! ```

mod error_handling;
mod event_loop;
mod handshake;
mod writer;

use crate::handlers::Commands;
use crate::state::{Hub, Session};
use crate::telemetry::spans;
use chat_proto::{Inbound, LineCodec, ProtocolError};
use error_handling::Disconnect;
use futures_util::Stream;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, warn};

/// A client connection handler.
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    hub: Arc<Hub>,
    commands: Arc<Commands>,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        hub: Arc<Hub>,
        commands: Arc<Commands>,
    ) -> Self {
        Self {
            stream,
            addr,
            hub,
            commands,
        }
    }

    /// Serve the client until it leaves or its transport fails.
    pub async fn run(self) {
        let Self {
            stream,
            addr,
            hub,
            commands,
        } = self;

        let (read_half, write_half) = stream.into_split();
        let codec = LineCodec::with_max_len(hub.limits.max_message_size)
            .with_style(hub.style);
        let mut reader = FramedRead::new(read_half, codec.clone());
        let writer = FramedWrite::new(write_half, codec);

        let (tx, rx) = mpsc::channel(hub.limits.outbox_capacity);
        let session = hub.new_session(addr, tx);
        let span = spans::connection(session.id(), addr);

        let mut writer_task = tokio::spawn(writer::write_loop(writer, rx).instrument(span.clone()));

        async {
            info!("Client connected");
            let outcome = serve(&session, &hub, &commands, &mut reader).await;
            teardown(&session, &hub, &outcome);
            // Last sender gone: the writer drains what is queued, then exits
            drop(session);

            match tokio::time::timeout(hub.linger(), &mut writer_task).await {
                Ok(_) => debug!("Outbox drained"),
                Err(_) => {
                    warn!(linger = ?hub.linger(), "Outbox not drained in time, dropping");
                    writer_task.abort();
                }
            }
            info!(reason = %outcome, "Client disconnected");
        }
        .instrument(span)
        .await;
    }
}

async fn serve<R>(
    session: &Arc<Session>,
    hub: &Arc<Hub>,
    commands: &Commands,
    reader: &mut R,
) -> Disconnect
where
    R: Stream<Item = Result<Inbound, ProtocolError>> + Unpin,
{
    if let Err(reason) = handshake::run_login(session, hub, reader).await {
        return reason;
    }
    event_loop::run_event_loop(session, hub, commands, reader).await
}

/// Drop the session's name binding and announce the departure if the
/// client did not already do so with `!exit`.
fn teardown(session: &Session, hub: &Hub, outcome: &Disconnect) {
    let was_bound = hub.registry.release_session(session);
    if was_bound && !outcome.is_explicit() && hub.announce_disconnects {
        hub.registry
            .broadcast_system(&format!("{} has left the chat", session.name()));
    }
}
