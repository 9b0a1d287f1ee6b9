//! `!rename <name>` handler.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use chat_proto::Verb;
use tracing::info;

/// Handler for `!rename`.
///
/// `!rename <name>`
///
/// Moves the caller's registry binding to the new name in one step and
/// announces the change to everyone, the caller included.
pub struct RenameHandler;

#[async_trait]
impl Handler for RenameHandler {
    async fn handle(&self, ctx: &Context<'_>, args: &[&str]) -> HandlerResult {
        let [new] = args else {
            return Err(HandlerError::BadArity(Verb::Rename));
        };

        let old = ctx.session.name();
        ctx.hub
            .registry
            .rename(&old, new)
            .map_err(HandlerError::Rename)?;

        info!(session = %ctx.session.id(), old = %old, new = %new, "Name changed");
        ctx.hub
            .registry
            .broadcast_system(&format!("{old} has changed name to {new}"));
        Ok(())
    }
}
