use crate::config::root::Config;
use crate::error::{GatewayError, Result};

/// Validates a loaded configuration before the engine starts.
///
/// At least one enabled radio with a non-empty hostname is required; a
/// zero-port listener or radio port is rejected outright.
pub fn validate(config: &Config) -> Result<()> {
    if config.proxy.listen_port == 0 {
        return Err(GatewayError::Config("proxy.listen_port must be > 0".into()));
    }
    if config.proxy.buffer_size == 0 {
        return Err(GatewayError::Config("proxy.buffer_size must be > 0".into()));
    }
    if config.proxy.session_ttl_s == 0 {
        return Err(GatewayError::Config("proxy.session_ttl_s must be > 0".into()));
    }
    if config.radios.is_empty() {
        return Err(GatewayError::NoEnabledRadios);
    }
    if !config.radios.iter().any(|r| r.enabled) {
        return Err(GatewayError::NoEnabledRadios);
    }
    for radio in &config.radios {
        if radio.hostname.trim().is_empty() {
            return Err(GatewayError::Config(format!(
                "radio '{}' has an empty hostname",
                radio.name
            )));
        }
        if radio.port == 0 {
            return Err(GatewayError::Config(format!(
                "radio '{}' has an invalid control port",
                radio.name
            )));
        }
    }
    Ok(())
}
