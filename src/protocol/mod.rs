//! Line-level protocol helpers.
//!
//! - [`line`]: inspecting inbound lines (source prefix, command, text)
//! - [`casemap`]: RFC 1459 nickname comparison
//! - outbound line builders below

pub mod casemap;
pub mod line;

pub use casemap::{irc_eq, irc_to_lower};
pub use line::{Source, identity_token, message_text, normalize_command, source};

/// `PRIVMSG <target> :<text>`
pub fn privmsg(target: &str, text: &str) -> String {
    format!("PRIVMSG {} :{}", target, text)
}

/// `NICK <nick>`
pub fn nick(nick: &str) -> String {
    format!("NICK {}", nick)
}

/// `USER <user> 8 * :<realname>`
pub fn user(user: &str, realname: &str) -> String {
    format!("USER {} 8 * :{}", user, realname)
}

/// `JOIN <channel> [key]`
pub fn join(channel: &str, key: Option<&str>) -> String {
    match key {
        Some(key) if !key.is_empty() => format!("JOIN {} {}", channel, key),
        _ => format!("JOIN {}", channel),
    }
}

/// `PONG <token>`
pub fn pong(token: &str) -> String {
    format!("PONG {}", token)
}

/// `QUIT :<reason>`
pub fn quit(reason: &str) -> String {
    format!("QUIT :{}", reason)
}
