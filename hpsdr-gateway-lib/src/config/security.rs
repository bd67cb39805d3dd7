use serde::Deserialize;

/// Authentication / anonymous-access policy for incoming client traffic.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SecurityConfig {
    /// When true, clients without a valid token are dropped instead of
    /// being granted an anonymous session.
    #[serde(default)]
    pub require_authentication: bool,
    /// When true, bytes[10..14] of an outgoing Discovery response are
    /// overwritten with the gateway's listen address before forwarding
    /// to the client. Default off: the Hermes-Lite 2 variant does not
    /// need this, clients use the UDP source address instead.
    #[serde(default)]
    pub rewrite_discovery_response: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { require_authentication: false, rewrite_discovery_response: false }
    }
}
