//! Text-level inspection of inbound protocol lines.
//!
//! The bot never builds a structured message from what the server sends.
//! These helpers pull the few pieces it needs (source, command word, first
//! parameter, trailing text) straight out of the raw line and treat
//! anything they cannot find as "not present".

/// The `nick` and `user@host` halves of a `:nick!user@host` line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source<'a> {
    pub nick: &'a str,
    pub identity: &'a str,
}

/// Parse the identity-bearing prefix at the start of a line.
///
/// The prefix runs from the leading `:` to the first space and must contain
/// a `!` with something on both sides. Server prefixes, bare nicks and
/// prefix-less lines yield `None`.
pub fn source(line: &str) -> Option<Source<'_>> {
    let rest = line.strip_prefix(':')?;
    let (prefix, _) = rest.split_once(' ')?;
    let (nick, identity) = prefix.split_once('!')?;
    if nick.is_empty() || identity.is_empty() {
        return None;
    }
    Some(Source { nick, identity })
}

/// Reduce a full `user@host` identity to its stable token (the part before
/// `@`). No separator, or nothing before it, keeps the whole string.
pub fn identity_token(identity: &str) -> &str {
    match identity.split_once('@') {
        Some((user, _)) if !user.is_empty() => user,
        _ => identity,
    }
}

/// Split a line into its command word and the parameters after it,
/// skipping a leading `:prefix` if present.
fn split_command(line: &str) -> Option<(&str, &str)> {
    let body = match line.strip_prefix(':') {
        Some(rest) => rest.split_once(' ')?.1,
        None => line,
    };
    let body = body.trim_start_matches(' ');
    match body.split_once(' ') {
        Some((cmd, params)) => Some((cmd, params)),
        None if !body.is_empty() => Some((body, "")),
        None => None,
    }
}

/// The command word of a line (`PRIVMSG`, `JOIN`, `001`, ...).
pub fn command(line: &str) -> Option<&str> {
    split_command(line).map(|(cmd, _)| cmd)
}

/// Everything after the command word (may be empty).
pub fn params(line: &str) -> Option<&str> {
    split_command(line).map(|(_, params)| params)
}

/// First parameter following the command word, with any leading `:`
/// removed (`JOIN :#chan` and `JOIN #chan` both yield `#chan`).
pub fn first_param(line: &str) -> Option<&str> {
    let (_, params) = split_command(line)?;
    let param = params.split(' ').find(|word| !word.is_empty())?;
    let param = param.strip_prefix(':').unwrap_or(param);
    (!param.is_empty()).then_some(param)
}

/// Chat text of a `PRIVMSG` line: everything after the first `:` that
/// follows the command word, trimmed. Empty text yields `None`.
pub fn message_text(line: &str) -> Option<&str> {
    let (cmd, params) = split_command(line)?;
    if !cmd.eq_ignore_ascii_case("PRIVMSG") {
        return None;
    }
    let (_, text) = params.split_once(':')?;
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

/// Drop everything ahead of the first `!` so decorations typed before a
/// command (`♥10 !gamble a b`) do not hide it. Text without a `!` is
/// returned unchanged. Applying it twice is the same as applying it once.
pub fn normalize_command(message: &str) -> &str {
    match message.find('!') {
        Some(bang) => &message[bang..],
        None => message,
    }
}
