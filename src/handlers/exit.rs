//! `!exit` handler.

use super::{Context, Handler, HandlerError, HandlerResult};
use async_trait::async_trait;
use tracing::info;

/// Handler for `!exit`.
///
/// Frees the caller's name, tells everyone else, and returns
/// [`HandlerError::Quit`] so the connection loop closes the socket.
pub struct ExitHandler;

#[async_trait]
impl Handler for ExitHandler {
    async fn handle(&self, ctx: &Context<'_>, _args: &[&str]) -> HandlerResult {
        let name = ctx.session.name();
        ctx.hub.registry.release(&name);
        ctx.hub
            .registry
            .broadcast_system(&format!("{name} has left the chat"));

        info!(session = %ctx.session.id(), name = %name, "Client exited");
        Err(HandlerError::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{drain, hub, join};
    use crate::handlers::{Commands, Context};
    use chat_proto::Reply;

    #[tokio::test]
    async fn test_exit_frees_name_and_announces() {
        let hub = hub();
        let (alice, mut alice_rx) = join(&hub, "alice");
        let (_bob, mut bob_rx) = join(&hub, "bob");

        let err = Commands::new()
            .dispatch(&Context::new(&alice, &hub), "!exit\r\n")
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::Quit));
        assert!(err.to_reply().is_none());
        assert!(hub.registry.lookup("alice").is_none());
        assert_eq!(
            drain(&mut bob_rx),
            vec![Reply::system("alice has left the chat")]
        );
        assert!(drain(&mut alice_rx).is_empty());

        // The name is immediately claimable again
        let (_again, _rx) = join(&hub, "alice");
    }
}
