//! Nicknames allowed to award and remove medals.

use super::lines::utf8_lines;
use crate::protocol::irc_to_lower;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Read-only set of admin nicknames, compared case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct AdminList {
    nicks: HashSet<String>,
}

impl AdminList {
    pub fn from_nicks<I, S>(nicks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nicks = nicks
            .into_iter()
            .map(|nick| nick.as_ref().trim().to_string())
            .filter(|nick| !nick.is_empty())
            .map(|nick| irc_to_lower(&nick))
            .collect();
        Self { nicks }
    }

    /// Load one nickname per line. A missing file gives an empty list.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "admin list not found, nobody can award medals");
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };

        let admins = Self::from_nicks(utf8_lines(&bytes));
        info!(path = %path.display(), count = admins.len(), "Loaded admins");
        Ok(admins)
    }

    pub fn is_admin(&self, nick: &str) -> bool {
        self.nicks.contains(&irc_to_lower(nick))
    }

    pub fn len(&self) -> usize {
        self.nicks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nicks.is_empty()
    }
}
