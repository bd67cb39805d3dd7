use serde::Deserialize;

/// Configuration for a single physical radio the gateway can route to.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RadioConfig {
    /// Opaque label used only for logs and metrics.
    pub name: String,
    /// Hostname or IP literal resolved once at startup.
    pub hostname: String,
    /// Control port. Defaults to 1024, the HPSDR Protocol 1 well-known port.
    #[serde(default = "default_control_port")]
    pub port: u16,
    /// Data port. Defaults to the control port when absent.
    #[serde(default)]
    pub data_port: Option<u16>,
    /// Whether this radio participates in resolution and selection.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_control_port() -> u16 {
    1024
}

fn default_true() -> bool {
    true
}
