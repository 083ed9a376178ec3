//! Default value functions for configuration.

use std::path::PathBuf;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

/// 512 bytes of message plus the 8191 bytes IRCv3 allows for tags.
pub fn default_line_max_len() -> usize {
    8703
}

// =============================================================================
// Auth / Channel Defaults
// =============================================================================

pub fn default_auth_service() -> String {
    "AuthServ@Services.GameSurge.net".to_string()
}

pub fn default_auth_delay_ms() -> u64 {
    1000
}

pub fn default_join_delay_ms() -> u64 {
    1500
}

pub fn default_moderation_service() -> String {
    "ChanServ".to_string()
}

// =============================================================================
// File Defaults
// =============================================================================

pub fn default_admins_file() -> PathBuf {
    PathBuf::from("admins.txt")
}

pub fn default_medals_file() -> PathBuf {
    PathBuf::from("voiced.txt")
}

pub fn default_broadcasts_file() -> PathBuf {
    PathBuf::from("messages.txt")
}

// =============================================================================
// Broadcast Defaults
// =============================================================================

pub fn default_interval_unit_secs() -> u64 {
    60
}

pub fn default_reload_interval_secs() -> u64 {
    24 * 60 * 60
}

pub fn default_outbound_capacity() -> usize {
    256
}
