use std::net::SocketAddr;
use std::time::Instant;

use crate::auth::Principal;

/// Why a session was removed from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Removed by an explicit request (e.g. an authenticator revoking
    /// access mid-session).
    Explicit,
    /// Past `session_timeout_s` since its last packet.
    Idle,
    /// Past its absolute `expires_at`, regardless of recent activity.
    Expired,
}

impl TerminationReason {
    pub fn as_metric_label(self) -> &'static str {
        match self {
            TerminationReason::Explicit => "explicit",
            TerminationReason::Idle => "idle",
            TerminationReason::Expired => "expired",
        }
    }
}

/// A live client<->radio binding.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: u64,
    pub client_addr: SocketAddr,
    pub radio_name: String,
    pub radio_control_addr: SocketAddr,
    pub radio_data_addr: SocketAddr,
    pub principal: Principal,
    pub created_at: Instant,
    pub last_activity: Instant,
    pub expires_at: Instant,
    pub packets_to_radio: u64,
    pub bytes_to_radio: u64,
    pub packets_to_client: u64,
    pub bytes_to_client: u64,
}

impl Session {
    pub fn is_idle(&self, now: Instant, timeout: std::time::Duration) -> bool {
        now.saturating_duration_since(self.last_activity) > timeout
    }

    /// True once a session has outlived its absolute lifetime,
    /// regardless of how recently it was active.
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    /// A point-in-time snapshot of this session's counters, suitable
    /// for handing to a persistence hook's periodic stats flush.
    pub fn snapshot(&self) -> SessionCounters {
        SessionCounters {
            session_id: self.session_id,
            client_addr: self.client_addr,
            radio_name: self.radio_name.clone(),
            packets_to_radio: self.packets_to_radio,
            bytes_to_radio: self.bytes_to_radio,
            packets_to_client: self.packets_to_client,
            bytes_to_client: self.bytes_to_client,
        }
    }
}

/// Point-in-time snapshot of one session's forwarding counters, handed
/// to [`crate::persistence::PersistenceHook::record_stats_interval`]
/// by the stats flusher. Not exported as per-session Prometheus series
/// (unbounded cardinality) — aggregate counts go through
/// [`crate::telemetry::Metrics`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCounters {
    pub session_id: u64,
    pub client_addr: SocketAddr,
    pub radio_name: String,
    pub packets_to_radio: u64,
    pub bytes_to_radio: u64,
    pub packets_to_client: u64,
    pub bytes_to_client: u64,
}
