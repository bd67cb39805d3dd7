use serde::Deserialize;
use std::net::IpAddr;

use super::performance::PerformanceConfig;
use super::radio::RadioConfig;
use super::security::SecurityConfig;
use super::telemetry::TelemetryConfig;

/// Radio selection strategy used to bind an anonymous or newly authenticated
/// client to one of the enabled radios.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RadioSelectionStrategy {
    /// Always pick the first enabled radio, in configuration order.
    #[default]
    FirstAvailable,
    /// Cycle through enabled radios.
    RoundRobin,
}

/// Proxy-level listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ProxyConfig {
    /// Address to bind the shared UDP socket to.
    #[serde(default = "default_listen_address")]
    pub listen_address: IpAddr,
    /// Port to bind the shared UDP socket to.
    pub listen_port: u16,
    /// Maximum datagram size the engine will read per recv call.
    /// The socket's receive buffer is sized at 100x this value.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Idle timeout for a session, in seconds.
    #[serde(default = "default_session_timeout_s")]
    pub session_timeout_s: u64,
    /// Absolute session lifetime from creation, in seconds, independent
    /// of activity. Mirrors the reference implementation's access-token
    /// expiry (`token_expiry`, default one hour): a session this old is
    /// terminated even if it has been continuously active.
    #[serde(default = "default_session_ttl_s")]
    pub session_ttl_s: u64,
    /// Reaper sweep period, in seconds.
    #[serde(default = "default_reaper_interval_s")]
    pub reaper_interval_s: u64,
    /// Strategy used to pick a radio for anonymous/new sessions.
    #[serde(default)]
    pub radio_selection: RadioSelectionStrategy,
}

fn default_listen_address() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_buffer_size() -> usize {
    2048
}

fn default_session_timeout_s() -> u64 {
    60
}

fn default_session_ttl_s() -> u64 {
    3600
}

fn default_reaper_interval_s() -> u64 {
    30
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// UDP listener settings.
    pub proxy: ProxyConfig,
    /// List of physical radios this gateway can route traffic to.
    /// At least one enabled radio is required.
    pub radios: Vec<RadioConfig>,
    /// Security / authentication policy.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Statistics collection cadence.
    #[serde(default)]
    pub performance: PerformanceConfig,
    /// Logging and metrics surface configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
