//! The session engine.
//!
//! Consumes inbound lines one at a time and returns the lines to send in
//! response. It owns the identity map, the medal store and the admin list;
//! handlers only see them through the per-dispatch [`Context`].
//!
//! Three things happen per line:
//! 1. any `:nick!user@host` prefix refreshes the identity map;
//! 2. a `JOIN` to our channel by a medal holder requests voice for them;
//! 3. a `PRIVMSG` to our channel runs through the handler chain, and a
//!    reply goes back to the channel addressed to the sender.

use crate::config::Config;
use crate::handlers::{Context, Registry};
use crate::protocol::{self, identity_token, irc_eq, line, message_text, normalize_command};
use crate::services::ServiceEffect;
use crate::state::{AdminList, IdentityMap, MedalStore};
use tracing::{debug, info};

pub struct Session {
    channel: String,
    moderation_service: String,
    identities: IdentityMap,
    medals: MedalStore,
    admins: AdminList,
    registry: Registry,
}

impl Session {
    pub fn new(
        channel: impl Into<String>,
        moderation_service: impl Into<String>,
        medals: MedalStore,
        admins: AdminList,
    ) -> Self {
        Self {
            channel: channel.into(),
            moderation_service: moderation_service.into(),
            identities: IdentityMap::new(),
            medals,
            admins,
            registry: Registry::new(),
        }
    }

    pub fn from_config(config: &Config, medals: MedalStore, admins: AdminList) -> Self {
        Self::new(
            config.channel.name.clone(),
            config.channel.moderation_service.clone(),
            medals,
            admins,
        )
    }

    pub fn identities(&self) -> &IdentityMap {
        &self.identities
    }

    pub fn medals(&self) -> &MedalStore {
        &self.medals
    }

    /// Process one inbound line; returns outbound lines in send order.
    pub fn handle_line(&mut self, raw: &str) -> Vec<String> {
        self.identities.observe(raw);

        match line::command(raw) {
            Some(cmd) if cmd.eq_ignore_ascii_case("JOIN") => self.on_join(raw),
            Some(cmd) if cmd.eq_ignore_ascii_case("PRIVMSG") => self.on_channel_message(raw),
            _ => Vec::new(),
        }
    }

    fn is_our_channel(&self, raw: &str) -> bool {
        line::first_param(raw).is_some_and(|target| irc_eq(target, &self.channel))
    }

    fn on_join(&mut self, raw: &str) -> Vec<String> {
        let Some(src) = protocol::source(raw) else {
            return Vec::new();
        };
        if !self.is_our_channel(raw) {
            return Vec::new();
        }

        self.identities.record(src.nick, src.identity);
        let token = identity_token(src.identity);
        match self.medals.level(token) {
            Some(level) => {
                info!(nick = %src.nick, token = %token, level = %level, "Auto-voicing medal holder");
                vec![self.render(&ServiceEffect::voice(src.nick))]
            }
            None => Vec::new(),
        }
    }

    fn on_channel_message(&mut self, raw: &str) -> Vec<String> {
        let Some(src) = protocol::source(raw) else {
            return Vec::new();
        };
        if !self.is_our_channel(raw) {
            return Vec::new();
        }
        let Some(text) = message_text(raw) else {
            return Vec::new();
        };
        let text = normalize_command(text);

        let mut ctx = Context::new(&self.identities, &mut self.medals, &self.admins);
        let reply = self.registry.dispatch(&mut ctx, src.nick, text, raw);
        let effects = ctx.into_effects();

        let mut out: Vec<String> = effects.iter().map(|effect| self.render(effect)).collect();
        if let Some(reply) = reply {
            debug!(sender = %src.nick, reply = %reply, "command reply");
            out.push(protocol::privmsg(
                &self.channel,
                &format!("{}: {}", src.nick, reply),
            ));
        }
        out
    }

    fn render(&self, effect: &ServiceEffect) -> String {
        effect.to_line(&self.moderation_service, &self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MedalLevel;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        let medals = MedalStore::new(dir.path().join("voiced.txt"));
        let admins = AdminList::from_nicks(["Alice"]);
        Session::new("#lobby", "ChanServ", medals, admins)
    }

    #[test]
    fn admin_medal_flow() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(s.handle_line(":Bob!bobident@host.example JOIN #lobby").is_empty());

        let out = s.handle_line(":Alice!alice@admin.example PRIVMSG #lobby :!medal Bob Gold");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "PRIVMSG ChanServ :voice #lobby Bob");
        assert!(out[1].starts_with("PRIVMSG #lobby :Alice: "));
        assert!(out[1].contains("Gold"));
        assert!(out[1].contains("🥇"));
        assert_eq!(s.medals().level("bobident"), Some(MedalLevel::Gold));
    }

    #[test]
    fn non_admin_cannot_award() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_line(":Bob!bobident@host.example JOIN #lobby");

        let out = s.handle_line(":Eve!eve@evil.example PRIVMSG #lobby :!medal Bob Gold");
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("only admins"));
        assert!(s.medals().is_empty());
    }

    #[test]
    fn medal_holder_is_voiced_on_rejoin() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_line(":Bob!bobident@host.example JOIN #lobby");
        s.handle_line(":Alice!alice@admin.example PRIVMSG #lobby :!medal Bob Gold");

        let out = s.handle_line(":Bob!bobident@other.example JOIN :#Lobby");
        assert_eq!(out, vec!["PRIVMSG ChanServ :voice #lobby Bob"]);
    }

    #[test]
    fn medal_follows_identity_across_nick_change() {
        let dir = TempDir::new().unwrap();
        let mut medals = MedalStore::new(dir.path().join("voiced.txt"));
        medals.grant("bobident", MedalLevel::Silver);
        let mut s = Session::new("#lobby", "ChanServ", medals, AdminList::default());

        let out = s.handle_line(":Robert!bobident@host.example JOIN #lobby");
        assert_eq!(out, vec!["PRIVMSG ChanServ :voice #lobby Robert"]);
    }

    #[test]
    fn joins_elsewhere_are_only_tracked() {
        let dir = TempDir::new().unwrap();
        let mut medals = MedalStore::new(dir.path().join("voiced.txt"));
        medals.grant("bobident", MedalLevel::Gold);
        let mut s = Session::new("#lobby", "ChanServ", medals, AdminList::default());

        assert!(s.handle_line(":Bob!bobident@host.example JOIN #other").is_empty());
        assert_eq!(s.identities().resolve_token("Bob"), Some("bobident"));
    }

    #[test]
    fn messages_to_other_targets_are_ignored() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        assert!(s.handle_line(":Carol!c@h PRIVMSG #other :!gamble a b").is_empty());
        assert!(s.handle_line(":Carol!c@h PRIVMSG MedalBot :!gamble a b").is_empty());
        assert!(s.handle_line(":Carol!c@h NOTICE #lobby :!gamble a b").is_empty());
    }

    #[test]
    fn any_prefixed_line_updates_identity() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        s.handle_line(":Dana!dana@h.example MODE Dana +i");
        assert_eq!(s.identities().resolve_token("dana"), Some("dana"));

        let out = s.handle_line(":Alice!alice@admin.example PRIVMSG #lobby :!medal Dana Silver");
        assert_eq!(out[0], "PRIVMSG ChanServ :voice #lobby Dana");
    }

    #[test]
    fn gamble_reply_is_addressed_to_sender() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        let out = s.handle_line(":Carol!c@h PRIVMSG #lobby :♥10 !gamble red blue green");
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("PRIVMSG #lobby :Carol: Carol gambled and won: "));
    }

    #[test]
    fn chatter_and_garbage_produce_nothing() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);
        for raw in [
            ":Carol!c@h PRIVMSG #lobby :hello everyone",
            ":Carol!c@h PRIVMSG #lobby :",
            ":Carol!c@h PRIVMSG #lobby",
            ":Carol!c@h JOIN",
            "PRIVMSG #lobby :!gamble a b",
            ":irc.example.net 353 MedalBot = #lobby :Bob Alice",
            ":",
            "",
            "JOIN",
        ] {
            assert!(s.handle_line(raw).is_empty(), "{:?}", raw);
        }
    }
}
