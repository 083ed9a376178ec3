//! Line splitting for the bot's plain-text data files.

use tracing::debug;

/// Split raw file contents into lines, dropping any line that is not
/// valid UTF-8. A trailing `\r` is removed from each line.
pub(crate) fn utf8_lines(bytes: &[u8]) -> impl Iterator<Item = &str> {
    bytes.split(|b| *b == b'\n').filter_map(|raw| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => Some(line),
            Err(e) => {
                debug!(error = %e, "skipping line that is not valid UTF-8");
                None
            }
        }
    })
}
