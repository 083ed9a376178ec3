//! Configuration loading and management.
//!
//! - [`types`]: config struct definitions and TOML loading
//! - [`defaults`]: serde default functions
//! - [`validation`]: startup checks

mod defaults;
mod types;
mod validation;

pub use types::{
    AuthConfig, BroadcastConfig, ChannelConfig, Config, ConfigError, FilesConfig, ServerConfig,
};
pub use validation::{ValidationError, validate};
