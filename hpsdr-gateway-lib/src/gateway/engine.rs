use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::{Authenticator, Principal};
use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::gateway::forwarder::{is_discovery_response, radio_target, rewrite_discovery_response};
use crate::persistence::{PersistenceHook, SessionMeta};
use crate::protocol::{extract_frequency_hz, ClassifierStats, PacketRecord};
use crate::radio::{resolve_radios, RadioDescriptor, RadioSelector};
use crate::session::SessionTable;
use crate::telemetry::{Direction, Metrics};

/// Owns the shared UDP socket and drives the single receive-classify-
/// dispatch loop described by the reference model: one task, no
/// per-datagram spawn, so packets from the same client are forwarded
/// in the order they arrived.
pub struct Engine {
    socket: Arc<UdpSocket>,
    radios: Vec<RadioDescriptor>,
    resolved_radios: Vec<RadioDescriptor>,
    radio_ips: ahash::AHashSet<IpAddr>,
    selector: Box<dyn RadioSelector>,
    authenticator: Arc<dyn Authenticator>,
    persistence: Arc<dyn PersistenceHook>,
    session_table: Arc<SessionTable>,
    session_ttl: Duration,
    metrics: Arc<Metrics>,
    classifier_stats: ClassifierStats,
    buffer_size: usize,
    require_authentication: bool,
    rewrite_discovery: bool,
    listen_address: std::net::IpAddr,
}

impl Engine {
    pub async fn bind(
        config: &Config,
        session_table: Arc<SessionTable>,
        authenticator: Arc<dyn Authenticator>,
        persistence: Arc<dyn PersistenceHook>,
        metrics: Arc<Metrics>,
        radio_ready: Arc<AtomicBool>,
    ) -> Result<Self> {
        let radios = resolve_radios(&config.radios).await?;
        if radios.iter().filter(|r| r.resolved).count() == 0 {
            radio_ready.store(false, std::sync::atomic::Ordering::Relaxed);
            return Err(GatewayError::NoEnabledRadios);
        }
        radio_ready.store(true, std::sync::atomic::Ordering::Relaxed);

        let resolved_radios: Vec<RadioDescriptor> =
            radios.iter().filter(|r| r.resolved).cloned().collect();
        let radio_ips =
            resolved_radios.iter().flat_map(|r| [r.control_addr.ip(), r.data_addr.ip()]).collect();

        let bind_addr = SocketAddr::new(config.proxy.listen_address, config.proxy.listen_port);
        let socket = bind_udp_socket(bind_addr, config.proxy.buffer_size)?;

        let selector = crate::radio::build_selector(config.proxy.radio_selection);

        Ok(Self {
            socket: Arc::new(socket),
            radios,
            resolved_radios,
            radio_ips,
            selector,
            authenticator,
            persistence,
            session_table,
            session_ttl: Duration::from_secs(config.proxy.session_ttl_s),
            metrics,
            classifier_stats: ClassifierStats::new(),
            buffer_size: config.proxy.buffer_size,
            require_authentication: config.security.require_authentication,
            rewrite_discovery: config.security.rewrite_discovery_response,
            listen_address: config.proxy.listen_address,
        })
    }

    /// Live classifier counters for the client->gateway receive path,
    /// exposed for status reporting alongside the Prometheus series on
    /// [`Metrics`].
    pub fn classifier_stats(&self) -> &ClassifierStats {
        &self.classifier_stats
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Runs the receive loop until SIGINT/SIGTERM or `shutdown` fires.
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
        let mut buf = vec![0u8; self.buffer_size];

        info!(addr = ?self.socket.local_addr()?, radios = self.radios.len(), "gateway engine started");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("received SIGTERM, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    info!("received SIGINT, shutting down");
                    break;
                }
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping engine");
                    break;
                }
                result = self.socket.recv_from(&mut buf) => {
                    match result {
                        Ok((len, from)) => self.dispatch(&buf[..len], from).await,
                        Err(e) => {
                            warn!(error = %e, "recv error");
                            self.metrics.record_error();
                        }
                    }
                }
            }
        }

        info!("gateway engine stopped");
        Ok(())
    }

    async fn dispatch(&self, data: &[u8], from: SocketAddr) {
        self.metrics.record_received(data.len() as u64);

        if self.radio_ips.contains(&from.ip()) {
            self.handle_from_radio(data, from).await;
        } else {
            self.handle_from_client(data, from).await;
        }
    }

    async fn handle_from_client(&self, data: &[u8], from: SocketAddr) {
        let record = self.classifier_stats.observe(data);
        self.log_record(&record, from, data);

        let now = Instant::now();
        let existing = self.session_table.get(from, now);

        let session = match existing {
            Some(session) => {
                self.session_table.record_to_radio(from, data.len() as u64, now);
                session
            }
            None => {
                let principal = if self.require_authentication {
                    // Protocol 1 carries no wire-level token field; a
                    // deployment wrapping this transport in one would
                    // extract it here before calling validate_token.
                    match self.authenticator.validate_token("").await {
                        Some(p) => p,
                        None => {
                            debug!(%from, "authentication denied, dropping packet");
                            self.metrics.record_dropped("unauthenticated");
                            return;
                        }
                    }
                } else {
                    Principal::Anonymous
                };
                let Some(radio) = self.selector.select(&self.resolved_radios) else {
                    self.metrics.record_dropped("no_radio_available");
                    return;
                };
                let (session, created) = self.session_table.get_or_create(
                    from,
                    radio,
                    principal.clone(),
                    now,
                    self.session_ttl,
                );
                if created {
                    self.metrics.record_session_created();
                    let meta = SessionMeta {
                        session_id: session.session_id,
                        client_addr: from,
                        radio_name: radio.name.clone(),
                        principal,
                    };
                    self.persistence.record_session_created(&meta).await;
                    info!(%from, radio = %radio.name, "session created");
                }
                self.session_table.record_to_radio(from, data.len() as u64, now);
                session
            }
        };

        let radio = match self.radios.iter().find(|r| r.name == session.radio_name) {
            Some(r) => r,
            None => {
                self.metrics.record_dropped("radio_no_longer_resolved");
                return;
            }
        };

        let target = radio_target(radio, &record);
        match self.socket.send_to(data, target).await {
            Ok(_) => self.metrics.record_forwarded(Direction::ToRadio, data.len() as u64),
            Err(e) => {
                warn!(error = %e, target = %target, "failed to forward to radio");
                self.metrics.record_error();
            }
        }
    }

    /// Handles a datagram whose source is a known radio endpoint.
    ///
    /// Per the engine's dispatch rule, `classify` is never invoked on
    /// this path: the source endpoint alone is enough to know this is
    /// a radio->client frame, and the forwarder's contract is to
    /// relay it unparsed. The one exception is the opt-in Discovery
    /// rewrite below, which inspects the raw bytes directly rather
    /// than going through the classifier.
    async fn handle_from_radio(&self, data: &[u8], from: SocketAddr) {
        debug!(%from, len = data.len(), "frame from radio");

        let Some(client_addr) = self.session_table.client_for_radio(from) else {
            self.metrics.record_dropped("no_session_for_radio");
            return;
        };

        self.session_table.record_to_client(client_addr, data.len() as u64, Instant::now());

        let mut out = data.to_vec();
        if self.rewrite_discovery && is_discovery_response(&out) {
            rewrite_discovery_response(&mut out, self.listen_address);
        }

        match self.socket.send_to(&out, client_addr).await {
            Ok(_) => self.metrics.record_forwarded(Direction::ToClient, out.len() as u64),
            Err(e) => {
                warn!(error = %e, target = %client_addr, "failed to forward to client");
                self.metrics.record_error();
            }
        }
    }

    fn log_record(&self, record: &PacketRecord, from: SocketAddr, data: &[u8]) {
        match record {
            PacketRecord::Data { sequence, .. } => {
                if let Some(hz) = extract_frequency_hz(data) {
                    debug!(%from, sequence, hz, "data frame");
                } else {
                    debug!(%from, sequence, "data frame");
                }
            }
            PacketRecord::Discovery { is_response, mac, board_id } => {
                debug!(%from, is_response, ?mac, ?board_id, "discovery");
            }
            PacketRecord::SetIp { target_ip } => {
                debug!(%from, ?target_ip, "set ip");
            }
            PacketRecord::Start | PacketRecord::Stop => {
                debug!(%from, "start/stop");
            }
            PacketRecord::Unknown => {
                debug!(%from, "unrecognized packet");
            }
        }
    }
}

fn bind_udp_socket(addr: SocketAddr, buffer_size: usize) -> Result<UdpSocket> {
    let domain = if addr.is_ipv6() { Domain::IPV6 } else { Domain::IPV4 };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_broadcast(true)?;
    socket.set_recv_buffer_size(buffer_size.saturating_mul(100))?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;

    let std_socket: std::net::UdpSocket = socket.into();
    let socket = UdpSocket::from_std(std_socket)?;
    Ok(socket)
}
