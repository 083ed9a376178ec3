//! Ordered handler chain and dispatch.
//!
//! Handlers are asked in registration order; the first one that claims the
//! message ends the walk, so at most one handler ever answers.

use super::context::{Context, Handler, Outcome};
use crate::handlers::{GambleHandler, MedalHandler};
use crate::protocol::normalize_command;
use tracing::debug;

/// Registry of command handlers.
pub struct Registry {
    handlers: Vec<Box<dyn Handler>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with the stock command set.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(GambleHandler);
        registry.register(MedalHandler);
        registry
    }

    /// Create a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a handler to the end of the chain.
    pub fn register(&mut self, handler: impl Handler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Handler names in chain order.
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Run `message` through the chain and return the reply to send, if any.
    pub fn dispatch(
        &self,
        ctx: &mut Context<'_>,
        sender: &str,
        message: &str,
        raw_line: &str,
    ) -> Option<String> {
        if message.trim().is_empty() {
            return None;
        }

        let message = normalize_command(message);
        for handler in &self.handlers {
            match handler.process(ctx, sender, message, raw_line) {
                Outcome::Pass => continue,
                Outcome::Reply(text) if !text.is_empty() => {
                    debug!(handler = handler.name(), sender = %sender, "command answered");
                    return Some(text);
                }
                Outcome::Reply(_) | Outcome::Consumed => {
                    debug!(handler = handler.name(), sender = %sender, "command consumed");
                    return None;
                }
            }
        }
        None
    }
}
