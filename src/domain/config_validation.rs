//! Configuration validation.
//!
//! Validates all config fields before the service starts.

use std::net::SocketAddr;

use crate::domain::error::GbceError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8000";

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), GbceError> {
    validate_window_minutes(config)?;
    Ok(())
}

pub fn validate_web_config(config: &dyn ConfigPort) -> Result<(), GbceError> {
    validate_listen(config)?;
    Ok(())
}

fn validate_window_minutes(config: &dyn ConfigPort) -> Result<(), GbceError> {
    let Some(raw) = config.get_string("market", "vwsp_window_minutes") else {
        return Ok(());
    };
    let invalid = |reason: &str| GbceError::ConfigInvalid {
        section: "market".to_string(),
        key: "vwsp_window_minutes".to_string(),
        reason: reason.to_string(),
    };
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("vwsp_window_minutes must be an integer"))?;
    if minutes <= 0 {
        return Err(invalid("vwsp_window_minutes must be positive"));
    }
    Ok(())
}

fn validate_listen(config: &dyn ConfigPort) -> Result<(), GbceError> {
    let listen = config.get_string_or("web", "listen", DEFAULT_LISTEN);
    listen
        .parse::<SocketAddr>()
        .map_err(|e| GbceError::ConfigInvalid {
            section: "web".to_string(),
            key: "listen".to_string(),
            reason: format!("'{listen}' is not a socket address: {e}"),
        })?;
    Ok(())
}
