//! Writer task: drains a session's outbound queue into the socket.

use chat_proto::{LineCodec, Reply};
use futures_util::SinkExt;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::codec::FramedWrite;
use tracing::debug;

/// Write queued replies until every sender is gone, then flush and shut the
/// write half down.
///
/// A write failure ends the task early, which closes the queue and lets the
/// connection loop notice on its next send.
pub(super) async fn write_loop<W>(
    mut writer: FramedWrite<W, LineCodec>,
    mut rx: mpsc::Receiver<Arc<Reply>>,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = rx.recv().await {
        if let Err(e) = writer.send(reply).await {
            debug!(error = %e, "Write failed, stopping writer");
            return;
        }
    }

    // Every send above already flushed
    if let Err(e) = writer.get_mut().shutdown().await {
        debug!(error = %e, "Shutdown of write half failed");
    }
}
