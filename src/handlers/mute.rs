//! `!mute <name>` handler.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chat_proto::{Reply, Verb};
use tracing::info;

/// Handler for `!mute`.
///
/// `!mute <name>`
///
/// Adds the named user to the caller's mute set. Muting someone who is
/// already muted leaves them muted and still reports success.
pub struct MuteHandler;

#[async_trait]
impl Handler for MuteHandler {
    async fn handle(&self, ctx: &Context<'_>, args: &[&str]) -> HandlerResult {
        let [target] = args else {
            return Err(HandlerError::BadArity(Verb::Mute));
        };

        let peer = ctx
            .hub
            .registry
            .lookup(target)
            .ok_or_else(|| HandlerError::NoSuchUser(target.to_string()))?;

        if ctx.session.mute(&peer) {
            info!(session = %ctx.session.id(), muted = %peer.id(), name = %target, "Peer muted");
        }
        ctx.reply(Reply::status("User has been muted")).await
    }
}
