use std::net::SocketAddr;

/// A radio known to the gateway, built once at startup from
/// [`crate::config::RadioConfig`] by DNS-resolving `hostname`.
///
/// `control_addr`/`data_addr` are always present, but when `resolved`
/// is `false` they are a deterministic placeholder, not a routable
/// address: the hostname failed to resolve at startup and the radio is
/// kept around as an opaque, disabled-for-routing entry rather than
/// dropped (see [`crate::radio::resolver`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioDescriptor {
    pub name: String,
    pub hostname: String,
    pub control_addr: SocketAddr,
    pub data_addr: SocketAddr,
    pub resolved: bool,
}
