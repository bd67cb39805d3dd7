use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

use tracing::warn;

use crate::config::RadioConfig;
use crate::error::{GatewayError, Result};
use crate::radio::descriptor::RadioDescriptor;

/// Resolves every enabled radio's hostname to a control and data
/// [`std::net::SocketAddr`], once, at startup.
///
/// DNS resolution is blocking; each lookup runs on the blocking thread
/// pool via [`tokio::task::spawn_blocking`] so the engine's async
/// reactor is never stalled by a slow resolver.
///
/// A single radio's resolution failure is non-fatal: it is logged at
/// warn and the radio is still returned, marked `resolved: false` with
/// a placeholder address, so it remains visible (for status reporting,
/// reconfiguration) without being eligible for selection or source
/// matching. Startup only fails if it leaves zero radios resolved
/// (enforced by the caller via [`GatewayError::NoEnabledRadios`]).
pub async fn resolve_radios(configs: &[RadioConfig]) -> Result<Vec<RadioDescriptor>> {
    let mut descriptors = Vec::with_capacity(configs.len());
    for cfg in configs.iter().filter(|c| c.enabled) {
        let cfg = cfg.clone();
        let descriptor = tokio::task::spawn_blocking(move || resolve_one(&cfg))
            .await
            .map_err(|e| GatewayError::Resolve(format!("resolver task panicked: {e}")))?;
        if !descriptor.resolved {
            warn!(
                radio = %descriptor.name,
                hostname = %descriptor.hostname,
                "radio hostname resolution failed, keeping radio as unresolved"
            );
        }
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

fn resolve_one(cfg: &RadioConfig) -> RadioDescriptor {
    let data_port = cfg.data_port.unwrap_or(cfg.port);

    let control_addr = resolve_host_port(&cfg.hostname, cfg.port);
    let data_addr = if data_port == cfg.port {
        control_addr
            .as_ref()
            .map(|addr| *addr)
            .map_err(|e| GatewayError::Resolve(e.to_string()))
    } else {
        resolve_host_port(&cfg.hostname, data_port)
    };

    match (&control_addr, &data_addr) {
        (Ok(control_addr), Ok(data_addr)) => RadioDescriptor {
            name: cfg.name.clone(),
            hostname: cfg.hostname.clone(),
            control_addr: *control_addr,
            data_addr: *data_addr,
            resolved: true,
        },
        _ => RadioDescriptor {
            name: cfg.name.clone(),
            hostname: cfg.hostname.clone(),
            control_addr: fallback_addr(&cfg.hostname, cfg.port),
            data_addr: fallback_addr(&cfg.hostname, data_port),
            resolved: false,
        },
    }
}

fn resolve_host_port(hostname: &str, port: u16) -> Result<SocketAddr> {
    (hostname, port)
        .to_socket_addrs()
        .map_err(|e| GatewayError::Resolve(format!("{hostname}:{port}: {e}")))?
        .next()
        .ok_or_else(|| GatewayError::Resolve(format!("{hostname}:{port}: no addresses returned")))
}

/// Deterministic placeholder address for a hostname that failed to
/// resolve, so an unresolved radio still carries a valid `SocketAddr`
/// rather than widening every downstream consumer to an optional or
/// textual address. Hashes the hostname into RFC 5737 TEST-NET-1
/// (`192.0.2.0/24`), which is reserved for documentation and never
/// routable, so it can never collide with a real radio or client.
fn fallback_addr(hostname: &str, port: u16) -> SocketAddr {
    use std::hash::{Hash, Hasher};
    let mut hasher = ahash::AHasher::default();
    hostname.hash(&mut hasher);
    let octet = (hasher.finish() % 254) as u8 + 1;
    SocketAddr::from((Ipv4Addr::new(192, 0, 2, octet), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_loopback_literal() {
        let cfg = RadioConfig {
            name: "r1".into(),
            hostname: "127.0.0.1".into(),
            port: 1024,
            data_port: None,
            enabled: true,
        };
        let resolved = resolve_radios(&[cfg]).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].resolved);
        assert_eq!(resolved[0].control_addr, resolved[0].data_addr);
        assert_eq!(resolved[0].control_addr.port(), 1024);
    }

    #[tokio::test]
    async fn skips_disabled_radios() {
        let cfg = RadioConfig {
            name: "r1".into(),
            hostname: "127.0.0.1".into(),
            port: 1024,
            data_port: None,
            enabled: false,
        };
        let resolved = resolve_radios(&[cfg]).await.unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_hostname_is_retained_as_unresolved() {
        let bad = RadioConfig {
            name: "bad".into(),
            hostname: "this-hostname-does-not-resolve.invalid".into(),
            port: 1024,
            data_port: None,
            enabled: true,
        };
        let good = RadioConfig {
            name: "good".into(),
            hostname: "127.0.0.1".into(),
            port: 1024,
            data_port: None,
            enabled: true,
        };
        let resolved = resolve_radios(&[bad, good]).await.unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, "bad");
        assert!(!resolved[0].resolved);
        assert_eq!(resolved[0].hostname, "this-hostname-does-not-resolve.invalid");
        assert_eq!(resolved[1].name, "good");
        assert!(resolved[1].resolved);
    }

    #[tokio::test]
    async fn unresolved_fallback_address_is_deterministic() {
        let cfg = RadioConfig {
            name: "bad".into(),
            hostname: "this-hostname-does-not-resolve.invalid".into(),
            port: 1024,
            data_port: None,
            enabled: true,
        };
        let first = resolve_radios(&[cfg.clone()]).await.unwrap();
        let second = resolve_radios(&[cfg]).await.unwrap();
        assert_eq!(first[0].control_addr, second[0].control_addr);
    }

    #[tokio::test]
    async fn resolves_distinct_data_port() {
        let cfg = RadioConfig {
            name: "r1".into(),
            hostname: "127.0.0.1".into(),
            port: 1024,
            data_port: Some(1025),
            enabled: true,
        };
        let resolved = resolve_radios(&[cfg]).await.unwrap();
        assert_eq!(resolved[0].control_addr.port(), 1024);
        assert_eq!(resolved[0].data_addr.port(), 1025);
    }
}
