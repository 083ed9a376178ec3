//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// One day per unit; the slowest priority then repeats every 200 days.
const MAX_INTERVAL_UNIT_SECS: u64 = 24 * 60 * 60;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.nick is required")]
    MissingNick,
    #[error("server.nick must not contain spaces, got '{0}'")]
    InvalidNick(String),
    #[error("channel.name must start with '#' or '&', got '{0}'")]
    InvalidChannel(String),
    #[error("auth.account and auth.password are required when [auth] is present")]
    IncompleteAuth,
    #[error("broadcast.interval_unit_secs must be greater than zero")]
    ZeroIntervalUnit,
    #[error("broadcast.interval_unit_secs must be at most {max}, got {0}", max = MAX_INTERVAL_UNIT_SECS)]
    IntervalUnitTooLarge(u64),
    #[error("broadcast.reload_interval_secs must be greater than zero")]
    ZeroReloadInterval,
    #[error("broadcast.outbound_capacity must be greater than zero")]
    ZeroOutboundCapacity,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    let nick = &config.server.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if nick.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    let channel = &config.channel.name;
    if !(channel.starts_with('#') || channel.starts_with('&')) || channel.contains(' ') {
        errors.push(ValidationError::InvalidChannel(channel.clone()));
    }

    if let Some(ref auth) = config.auth
        && (auth.account.is_empty() || auth.password.is_empty())
    {
        errors.push(ValidationError::IncompleteAuth);
    }

    // Zero outbound capacity would panic in tokio::sync::mpsc::channel.
    if config.broadcast.outbound_capacity == 0 {
        errors.push(ValidationError::ZeroOutboundCapacity);
    }
    if config.broadcast.enabled {
        let unit = config.broadcast.interval_unit_secs;
        if unit == 0 {
            errors.push(ValidationError::ZeroIntervalUnit);
        } else if unit > MAX_INTERVAL_UNIT_SECS {
            errors.push(ValidationError::IntervalUnitTooLarge(unit));
        }
        if config.broadcast.reload_interval_secs == 0 {
            errors.push(ValidationError::ZeroReloadInterval);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
