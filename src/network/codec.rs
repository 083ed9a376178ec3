//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines and writes CRLF-terminated ones. The bot
//! reads whatever the network sends it, so the decoder is lenient: invalid
//! UTF-8 is replaced, and lines over the length limit are dropped instead
//! of failing the stream.

use crate::error::ProtocolError;
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

/// Default maximum inbound line length: 512 bytes plus 8191 of IRCv3 tags.
pub const DEFAULT_MAX_LINE_LEN: usize = 8703;

/// Line-based codec that handles newline-terminated messages.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Inside an overlong line; drop bytes up to the next newline.
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Reject characters that would break line framing on the wire.
    fn validate_outbound(line: &str) -> Result<(), ProtocolError> {
        match line.chars().find(|c| matches!(c, '\r' | '\n' | '\0')) {
            Some(ch) => Err(ProtocolError::IllegalControlChar(ch)),
            None => Ok(()),
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        loop {
            // Look for newline starting from where we left off
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len {
                    warn!(len = src.len(), limit = self.max_len, "discarding overlong line");
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                } else {
                    // No complete line yet - remember where we stopped
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if std::mem::take(&mut self.discarding) {
                continue;
            }
            if line.len() > self.max_len {
                warn!(len = line.len(), limit = self.max_len, "discarding overlong line");
                continue;
            }

            let text = String::from_utf8_lossy(&line);
            let text = text.trim_end_matches(['\r', '\n']);
            if text.is_empty() {
                continue;
            }
            return Ok(Some(text.to_string()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        // Unterminated tail at end of stream; nothing more will complete it.
        if !src.is_empty() {
            warn!(len = src.len(), "dropping unterminated line at end of stream");
            src.clear();
        }
        self.next_index = 0;
        self.discarding = false;
        Ok(None)
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        Self::validate_outbound(&line)?;
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}
