//! Phase 2: read/dispatch loop for a logged-in session.

use super::error_handling::{Disconnect, input_too_long_reply};
use crate::handlers::{Commands, Context, HandlerError};
use crate::state::{Hub, Session};
use chat_proto::{Inbound, ProtocolError, Reply, Style};
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Read lines and dispatch them until the client exits or the transport
/// fails. No read timeout is applied.
pub(super) async fn run_event_loop<R>(
    session: &Arc<Session>,
    hub: &Arc<Hub>,
    commands: &Commands,
    reader: &mut R,
) -> Disconnect
where
    R: Stream<Item = Result<Inbound, ProtocolError>> + Unpin,
{
    let ctx = Context::new(session, hub);

    loop {
        let frame = match reader.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => return Disconnect::Read(e),
            None => return Disconnect::Eof,
        };

        // Terminal clients echo what they typed; wipe it before output resumes
        if hub.style == Style::Ansi && session.send(Reply::EraseLine).await.is_err() {
            return Disconnect::WriterGone;
        }

        let line = match frame {
            Inbound::Line(line) => line,
            Inbound::Overflow { limit } => {
                debug!(limit, "Input line too long");
                if session.send(input_too_long_reply(limit)).await.is_err() {
                    return Disconnect::WriterGone;
                }
                continue;
            }
        };

        match commands.dispatch(&ctx, &line).await {
            Ok(()) => {}
            Err(HandlerError::Quit) => return Disconnect::Quit,
            Err(HandlerError::Send(_)) => return Disconnect::WriterGone,
            Err(e) => {
                if let HandlerError::Internal(msg) = &e {
                    warn!(error = %msg, "Internal handler error");
                }
                if let Some(reply) = e.to_reply()
                    && session.send(reply).await.is_err()
                {
                    return Disconnect::WriterGone;
                }
            }
        }
    }
}
