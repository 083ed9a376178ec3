//! Core configuration types and loading.

use super::defaults::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server connection and identity.
    pub server: ServerConfig,
    /// Optional account login through a services bot.
    pub auth: Option<AuthConfig>,
    /// The channel the bot lives in.
    pub channel: ChannelConfig,
    /// Data file locations.
    #[serde(default)]
    pub files: FilesConfig,
    /// Scheduled broadcast settings.
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server connection and bot identity.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server hostname (e.g., "irc.gamesurge.net").
    pub host: String,
    /// Plaintext port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname to register with.
    pub nick: String,
    /// Username for USER; defaults to the nickname.
    #[serde(default)]
    pub user: Option<String>,
    /// Realname for USER; defaults to the username.
    #[serde(default)]
    pub realname: Option<String>,
    /// Longest inbound line accepted before it is discarded (default: 8703).
    #[serde(default = "default_line_max_len")]
    pub line_max_len: usize,
}

impl ServerConfig {
    /// `host:port` for connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(&self.nick)
    }

    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or_else(|| self.user())
    }
}

/// Login through a services bot with `AUTH <account> <password>`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Target of the AUTH message (default: "AuthServ@Services.GameSurge.net").
    #[serde(default = "default_auth_service")]
    pub service: String,
    pub account: String,
    pub password: String,
    /// Milliseconds to wait after RPL_WELCOME before authenticating (default: 1000).
    #[serde(default = "default_auth_delay_ms")]
    pub delay_ms: u64,
}

impl AuthConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Channel membership and moderation.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Channel name (e.g., "#lobby").
    pub name: String,
    /// Channel key, if the channel is keyed.
    #[serde(default)]
    pub key: Option<String>,
    /// Milliseconds to wait before sending JOIN (default: 1500).
    #[serde(default = "default_join_delay_ms")]
    pub join_delay_ms: u64,
    /// Service asked to voice/devoice people (default: "ChanServ").
    #[serde(default = "default_moderation_service")]
    pub moderation_service: String,
}

impl ChannelConfig {
    pub fn join_delay(&self) -> Duration {
        Duration::from_millis(self.join_delay_ms)
    }
}

/// Data file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Admin nicknames, one per line (default: "admins.txt").
    #[serde(default = "default_admins_file")]
    pub admins: PathBuf,
    /// Medal records (default: "voiced.txt").
    #[serde(default = "default_medals_file")]
    pub medals: PathBuf,
    /// Scheduled broadcasts (default: "messages.txt").
    #[serde(default = "default_broadcasts_file")]
    pub broadcasts: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            admins: default_admins_file(),
            medals: default_medals_file(),
            broadcasts: default_broadcasts_file(),
        }
    }
}

/// Scheduled broadcast settings.
///
/// Broadcast intervals in the messages file are counted in units of
/// `interval_unit_secs` (one minute by default).
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Length of one interval unit in seconds (default: 60).
    #[serde(default = "default_interval_unit_secs")]
    pub interval_unit_secs: u64,
    /// Seconds between reloads of the messages file (default: 86400).
    #[serde(default = "default_reload_interval_secs")]
    pub reload_interval_secs: u64,
    /// Outbound line queue capacity (default: 256).
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
}

impl BroadcastConfig {
    pub fn interval_unit(&self) -> Duration {
        Duration::from_secs(self.interval_unit_secs)
    }

    pub fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.reload_interval_secs)
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_unit_secs: default_interval_unit_secs(),
            reload_interval_secs: default_reload_interval_secs(),
            outbound_capacity: default_outbound_capacity(),
        }
    }
}
