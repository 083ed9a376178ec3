//! Connection registration and channel join.
//!
//! Drives the client side of registration: `NICK`/`USER` on connect, `PONG`
//! for every `PING`, an optional services login once the server welcomes
//! us, and the channel `JOIN` once the login has taken effect (or straight
//! after the welcome when no login is configured).

use crate::config::{AuthConfig, Config};
use crate::protocol::{self, line};
use std::time::Duration;
use tracing::{info, warn};

/// Numeric for a successful registration.
const RPL_WELCOME: &str = "001";
/// Numeric announcing the account's hidden host is active.
const RPL_HOSTHIDDEN: &str = "396";
/// Numeric for a nickname already taken.
const ERR_NICKNAMEINUSE: &str = "433";
const HIDDEN_HOST_TEXT: &str = "is now your hidden host";

/// Something the connection loop should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send(String),
    SendAfter(Duration, String),
}

/// Registration progress for one connection.
#[derive(Debug)]
pub struct Handshake {
    nick: String,
    user: String,
    realname: String,
    auth: Option<AuthConfig>,
    channel: String,
    key: Option<String>,
    join_delay: Duration,
    registered: bool,
    authed: bool,
    joined: bool,
}

impl Handshake {
    pub fn from_config(config: &Config) -> Self {
        Self {
            nick: config.server.nick.clone(),
            user: config.server.user().to_string(),
            realname: config.server.realname().to_string(),
            auth: config.auth.clone(),
            channel: config.channel.name.clone(),
            key: config.channel.key.clone(),
            join_delay: config.channel.join_delay(),
            registered: false,
            authed: false,
            joined: false,
        }
    }

    /// Lines to send as soon as the socket is up.
    pub fn greeting(&self) -> Vec<String> {
        vec![
            protocol::nick(&self.nick),
            protocol::user(&self.user, &self.realname),
        ]
    }

    pub fn is_joined(&self) -> bool {
        self.joined
    }

    /// React to one inbound line.
    pub fn on_line(&mut self, raw: &str) -> Vec<Action> {
        let Some(command) = line::command(raw) else {
            return Vec::new();
        };

        if command.eq_ignore_ascii_case("PING") {
            let token = line::params(raw).unwrap_or_default();
            return vec![Action::Send(protocol::pong(token))];
        }

        match command {
            RPL_WELCOME if !self.registered => self.on_welcome(),
            ERR_NICKNAMEINUSE if !self.registered => {
                self.nick.push('_');
                warn!(nick = %self.nick, "Nickname in use, retrying");
                vec![Action::Send(protocol::nick(&self.nick))]
            }
            _ if self.authed && !self.joined && is_hidden_host(command, raw) => {
                info!("Hidden host active");
                self.join()
            }
            _ => Vec::new(),
        }
    }

    fn on_welcome(&mut self) -> Vec<Action> {
        self.registered = true;
        info!(nick = %self.nick, "Registered with server");

        match &self.auth {
            Some(auth) => {
                self.authed = true;
                info!(service = %auth.service, account = %auth.account, "Authenticating");
                let login = protocol::privmsg(
                    &auth.service,
                    &format!("AUTH {} {}", auth.account, auth.password),
                );
                vec![Action::SendAfter(auth.delay(), login)]
            }
            None => self.join(),
        }
    }

    fn join(&mut self) -> Vec<Action> {
        self.joined = true;
        info!(channel = %self.channel, "Joining channel");
        let join = protocol::join(&self.channel, self.key.as_deref());
        vec![Action::SendAfter(self.join_delay, join)]
    }
}

fn is_hidden_host(command: &str, raw: &str) -> bool {
    command == RPL_HOSTHIDDEN || raw.contains(HIDDEN_HOST_TEXT)
}
