use serde::Deserialize;

/// Logging and metrics surface configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Can be overridden at runtime via RUST_LOG.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Show module path (target) in log messages.
    #[serde(default)]
    pub show_target: bool,
    /// Port for the observability HTTP server (`/metrics`, `/health`,
    /// `/ready`, `/live`). When absent, the server is not started.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), show_target: false, metrics_port: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
