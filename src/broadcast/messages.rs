//! Scheduled broadcast definitions.
//!
//! One broadcast per line: the message words followed by a priority
//! number. Priority decides how many interval units pass between sends.

use crate::state::utf8_lines;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Written when the messages file does not exist yet.
pub const DEFAULT_MESSAGES: &str = "Welcome to the channel! 1\nStay active and have fun! 2\n";

/// A message repeated to the channel on a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub text: String,
    pub interval_units: u32,
}

impl Broadcast {
    pub fn new(text: impl Into<String>, priority: i64) -> Self {
        Self {
            text: text.into(),
            interval_units: interval_units(priority),
        }
    }

    /// Time between sends, given the length of one unit.
    pub fn interval(&self, unit: Duration) -> Duration {
        unit.saturating_mul(self.interval_units)
    }
}

/// Interval units for a priority: 1 → 50, 2 → 100, 3 → 150, other → 200.
pub fn interval_units(priority: i64) -> u32 {
    match priority {
        1 => 50,
        2 => 100,
        3 => 150,
        _ => 200,
    }
}

/// Parse `<message words...> <priority>`.
pub fn parse_line(line: &str) -> Option<Broadcast> {
    let (text, priority) = line.trim().rsplit_once(' ')?;
    let priority: i64 = priority.parse().ok()?;
    let text = text.trim_end();
    if text.is_empty() {
        return None;
    }
    Some(Broadcast::new(text, priority))
}

pub fn parse_messages(content: &str) -> Vec<Broadcast> {
    parse_lines(content.lines())
}

fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Broadcast> {
    lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                debug!(line = %line, "skipping malformed broadcast line");
            }
            parsed
        })
        .collect()
}

/// Load broadcasts from `path`, creating it with [`DEFAULT_MESSAGES`] if
/// it does not exist.
pub fn load_messages(path: &Path) -> std::io::Result<Vec<Broadcast>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            std::fs::write(path, DEFAULT_MESSAGES)?;
            info!(path = %path.display(), "Created default broadcast file");
            DEFAULT_MESSAGES.as_bytes().to_vec()
        }
        Err(e) => return Err(e),
    };

    let messages = parse_lines(utf8_lines(&bytes));
    info!(path = %path.display(), count = messages.len(), "Loaded scheduled broadcasts");
    Ok(messages)
}
