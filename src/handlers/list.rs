//! Listing handlers: `!list`, `!muted`
//!
//! Both reply only to the caller, one `| name` row per entry.

use super::{Context, Handler, HandlerResult};
use async_trait::async_trait;
use chat_proto::Reply;

/// Handler for `!list`.
///
/// Enumerates every registered name from a registry snapshot, so the
/// registry lock is not held while the rows are queued.
pub struct ListHandler;

#[async_trait]
impl Handler for ListHandler {
    async fn handle(&self, ctx: &Context<'_>, _args: &[&str]) -> HandlerResult {
        for name in ctx.hub.registry.snapshot_names() {
            ctx.reply(Reply::entry(name)).await?;
        }
        Ok(())
    }
}

/// Handler for `!muted`.
pub struct MutedHandler;

#[async_trait]
impl Handler for MutedHandler {
    async fn handle(&self, ctx: &Context<'_>, _args: &[&str]) -> HandlerResult {
        for name in ctx.session.muted_names() {
            ctx.reply(Reply::entry(name)).await?;
        }
        Ok(())
    }
}
