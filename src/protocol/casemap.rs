//! Nickname folding.
//!
//! Servers treat `Bob[m]` and `bob{M}` as the same nickname, so the admin
//! list, the identity map and channel checks all compare through
//! [`fold_char`]: ASCII letters lose their case and `[]\~` become `{}|^`.

/// Fold one character for nickname comparison.
#[inline]
pub fn fold_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        c => c.to_ascii_lowercase(),
    }
}

/// Folded form of a nickname or channel name, used as a map key.
pub fn irc_to_lower(name: &str) -> String {
    name.chars().map(fold_char).collect()
}

/// Whether two nicknames (or channel names) refer to the same thing.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_nick_with_brackets_folds_to_braces() {
        assert_eq!(irc_to_lower("Dave[AFK]"), "dave{afk}");
        assert_eq!(irc_to_lower("Rob\\Ross~"), "rob|ross^");
    }

    #[test]
    fn non_ascii_letters_are_left_alone() {
        assert_eq!(fold_char('É'), 'É');
        assert_eq!(irc_to_lower("ZOË"), "zoË");
    }

    #[test]
    fn channel_and_nick_equality() {
        assert!(irc_eq("#Arena", "#arena"));
        assert!(irc_eq("Bob[m]", "bob{M}"));
        assert!(!irc_eq("bob", "bobby"));
        assert!(!irc_eq("", "a"));
    }
}
