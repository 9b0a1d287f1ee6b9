//! `!help` handler.

use super::{Context, Handler, HandlerResult};
use async_trait::async_trait;
use chat_proto::Reply;

/// Handler for `!help`: sends the command summary to the caller.
pub struct HelpHandler;

#[async_trait]
impl Handler for HelpHandler {
    async fn handle(&self, ctx: &Context<'_>, _args: &[&str]) -> HandlerResult {
        ctx.reply(Reply::Help).await
    }
}
