//! Chat messages: any line that is not a command.

use super::Context;

/// Broadcast `text` from the caller to everyone who has not muted them.
pub fn post(ctx: &Context<'_>, text: &str) {
    ctx.hub.registry.broadcast_from(ctx.session, text);
}
