//! Nickname → identity tracking.
//!
//! Every line whose prefix is `:nick!user@host` refreshes the entry for
//! that nickname. Entries are never removed: a stale mapping is simply
//! overwritten the next time the nickname is seen.

use crate::protocol::{identity_token, irc_to_lower, source};
use std::collections::HashMap;
use tracing::trace;

/// Most recently observed `user@host` for each nickname.
#[derive(Debug, Default)]
pub struct IdentityMap {
    /// Keyed by IRC-lowercased nickname.
    entries: HashMap<String, String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the identity carried by `line`'s prefix, if it has one.
    pub fn observe(&mut self, line: &str) {
        if let Some(src) = source(line) {
            self.record(src.nick, src.identity);
        }
    }

    /// Overwrite the identity for `nick`.
    pub fn record(&mut self, nick: &str, identity: &str) {
        if nick.is_empty() || identity.is_empty() {
            return;
        }
        trace!(nick = %nick, identity = %identity, "identity observed");
        self.entries.insert(irc_to_lower(nick), identity.to_string());
    }

    /// Full `user@host` last seen for `nick`.
    pub fn identity(&self, nick: &str) -> Option<&str> {
        self.entries.get(&irc_to_lower(nick)).map(String::as_str)
    }

    /// Stable token (identity before `@`) last seen for `nick`.
    pub fn resolve_token(&self, nick: &str) -> Option<&str> {
        self.identity(nick).map(identity_token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
