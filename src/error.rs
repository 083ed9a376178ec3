//! Unified error handling for the bot.
//!
//! Only failures that leave the process unable to continue (configuration,
//! transport loss) or that an operator must see (medal file I/O) become
//! error values. Malformed inbound lines never do; they are skipped where
//! they are read.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Protocol / transport errors
// ============================================================================

/// Line codec errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound line would smuggle a line break or NUL onto the wire.
    #[error("illegal control character {0:?} in outbound line")]
    IllegalControlChar(char),
}

/// Errors that end a bot session.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("server closed the connection")]
    Disconnected,

    #[error("outbound writer is gone")]
    OutboundClosed,
}

// ============================================================================
// Storage errors
// ============================================================================

/// Medal store file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "store_read",
            Self::Write { .. } => "store_write",
        }
    }
}
