//! Handler trait and per-dispatch context.

use crate::services::ServiceEffect;
use crate::state::{AdminList, IdentityMap, MedalStore};

/// What a handler did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not this handler's command; try the next one.
    Pass,
    /// Claimed, answer with this text.
    Reply(String),
    /// Claimed, say nothing.
    Consumed,
}

impl Outcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }
}

/// State a handler may read or change while processing one message.
///
/// Moderation requests are collected here rather than sent directly so the
/// caller can put them on the wire ahead of the handler's reply.
pub struct Context<'a> {
    pub identities: &'a IdentityMap,
    pub medals: &'a mut MedalStore,
    pub admins: &'a AdminList,
    effects: Vec<ServiceEffect>,
}

impl<'a> Context<'a> {
    pub fn new(
        identities: &'a IdentityMap,
        medals: &'a mut MedalStore,
        admins: &'a AdminList,
    ) -> Self {
        Self {
            identities,
            medals,
            admins,
            effects: Vec::new(),
        }
    }

    /// Queue a voice/devoice request.
    pub fn request(&mut self, effect: ServiceEffect) {
        self.effects.push(effect);
    }

    pub fn into_effects(self) -> Vec<ServiceEffect> {
        self.effects
    }
}

/// A chat command processor in the handler chain.
pub trait Handler: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Inspect a (normalized) chat message from `sender`.
    ///
    /// `raw_line` is the full protocol line the message came from.
    fn process(
        &self,
        ctx: &mut Context<'_>,
        sender: &str,
        message: &str,
        raw_line: &str,
    ) -> Outcome;
}
