//! Moderation side effects requested by the bot.
//!
//! The bot has no channel privileges of its own; it asks the network's
//! channel service to voice or devoice people. Requests are fire-and-forget:
//! nothing waits for, or checks, the service's answer.

use crate::protocol::privmsg;

/// A privilege change to request from the channel service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEffect {
    /// Grant voice to `nick`.
    Voice { nick: String },
    /// Take voice away from `nick`.
    Devoice { nick: String },
}

impl ServiceEffect {
    pub fn voice(nick: impl Into<String>) -> Self {
        Self::Voice { nick: nick.into() }
    }

    pub fn devoice(nick: impl Into<String>) -> Self {
        Self::Devoice { nick: nick.into() }
    }

    pub fn nick(&self) -> &str {
        match self {
            Self::Voice { nick } | Self::Devoice { nick } => nick,
        }
    }

    /// Render as `PRIVMSG <service> :<voice|devoice> <channel> <nick>`.
    pub fn to_line(&self, service: &str, channel: &str) -> String {
        let verb = match self {
            Self::Voice { .. } => "voice",
            Self::Devoice { .. } => "devoice",
        };
        privmsg(service, &format!("{} {} {}", verb, channel, self.nick()))
    }
}
