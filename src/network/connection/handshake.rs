//! Phase 1: login.
//!
//! Prompts for a name until one is claimed in the registry. Nothing else a
//! client sends is interpreted before that.

use super::error_handling::{Disconnect, input_too_long_reply};
use crate::state::{ClaimError, Hub, Session};
use chat_proto::{Inbound, ProtocolError, Reply, strip_terminator};
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Run the login exchange. Returns the claimed name.
pub(super) async fn run_login<R>(
    session: &Arc<Session>,
    hub: &Hub,
    reader: &mut R,
) -> Result<String, Disconnect>
where
    R: Stream<Item = Result<Inbound, ProtocolError>> + Unpin,
{
    let name = loop {
        send(session, Reply::Prompt).await?;

        let line = match reader.next().await.ok_or(Disconnect::Eof)?? {
            Inbound::Line(line) => line,
            Inbound::Overflow { limit } => {
                send(session, input_too_long_reply(limit)).await?;
                continue;
            }
        };

        let candidate = strip_terminator(&line);
        match hub.registry.try_claim(session, candidate) {
            Ok(()) => break candidate.to_string(),
            Err(ClaimError::Taken(name)) => {
                debug!(name = %name, "Login name taken");
                send(session, Reply::status(format!("{name} is taken")))
                    .await?;
            }
            Err(e) => {
                debug!(error = %e, "Login name rejected");
                send(session, Reply::status("Invalid username")).await?;
            }
        }
    };

    send(session, Reply::Help).await?;
    hub.registry
        .broadcast_system(&format!("{name} has joined the chat"));
    info!(name = %name, users = hub.registry.len(), "Client logged in");

    Ok(name)
}

async fn send(session: &Session, reply: Reply) -> Result<(), Disconnect> {
    session
        .send(reply)
        .await
        .map_err(|_| Disconnect::WriterGone)
}
