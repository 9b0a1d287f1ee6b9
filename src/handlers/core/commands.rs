//! Command handler table and dispatch.

use super::context::{Context, Handler, HandlerError, HandlerResult};
use crate::handlers::{
    exit::ExitHandler,
    help::HelpHandler,
    list::{ListHandler, MutedHandler},
    messaging::post,
    mute::MuteHandler,
    rename::RenameHandler,
};
use chat_proto::{Input, Verb, parse_input};
use std::collections::HashMap;
use tracing::{Instrument, debug};

/// Table of command handlers, one per [`Verb`].
pub struct Commands {
    handlers: HashMap<Verb, Box<dyn Handler>>,
}

impl Commands {
    /// Create a table with every handler registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<Verb, Box<dyn Handler>> = HashMap::new();

        handlers.insert(Verb::Help, Box::new(HelpHandler));
        handlers.insert(Verb::List, Box::new(ListHandler));
        handlers.insert(Verb::Muted, Box::new(MutedHandler));
        handlers.insert(Verb::Mute, Box::new(MuteHandler));
        handlers.insert(Verb::Rename, Box::new(RenameHandler));
        handlers.insert(Verb::Exit, Box::new(ExitHandler));

        Self { handlers }
    }

    /// Interpret one raw input line from a logged-in session.
    pub async fn dispatch(&self, ctx: &Context<'_>, line: &str) -> HandlerResult {
        match parse_input(line)? {
            Input::Empty => Ok(()),
            Input::Chat(text) => {
                post(ctx, text);
                Ok(())
            }
            Input::Command { verb, args } => {
                let Some(handler) = self.handlers.get(&verb) else {
                    return Err(HandlerError::Internal(format!("no handler for {verb}")));
                };

                let source = ctx.session.name();
                let span = crate::telemetry::spans::command(verb.keyword(), &source);
                let result = handler.handle(ctx, &args).instrument(span).await;

                if let Err(e) = &result {
                    debug!(
                        command = %verb,
                        source = %source,
                        code = e.error_code(),
                        "Command failed"
                    );
                }
                result
            }
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}
