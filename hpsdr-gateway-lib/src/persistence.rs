use async_trait::async_trait;
use std::net::SocketAddr;

use crate::auth::Principal;
use crate::session::{SessionCounters, TerminationReason};

/// Everything known about a session at creation time, handed to
/// [`PersistenceHook::record_session_created`]. A snapshot rather than
/// a `&Session` reference so a hook can hold onto it past the call
/// (e.g. to batch an insert) without borrowing the session table.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub session_id: u64,
    pub client_addr: SocketAddr,
    pub radio_name: String,
    pub principal: Principal,
}

/// External collaborator notified of session lifecycle events and
/// periodic counters. All methods default to doing nothing, so a
/// gateway with no database wired in still runs correctly.
///
/// Grounded on the reference implementation's session manager, which
/// mirrors every in-memory mutation to a database; here that mirroring
/// is pulled out to a seam instead of being load-bearing for gateway
/// correctness.
#[async_trait]
pub trait PersistenceHook: Send + Sync {
    async fn record_session_created(&self, _meta: &SessionMeta) {}

    async fn record_session_terminated(&self, _session_id: u64, _reason: TerminationReason) {}

    /// Called on the stats-flusher interval with a snapshot of every
    /// live session's forwarding counters, when `performance.stats_enabled`
    /// is set.
    async fn record_stats_interval(&self, _snapshots: &[SessionCounters]) {}

    /// Called on every reaper sweep tick, after idle sessions have been
    /// evicted from the in-memory table, so a backing store can expire
    /// its own rows on the same cadence.
    async fn cleanup_expired(&self) {}
}

/// Default [`PersistenceHook`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

#[async_trait]
impl PersistenceHook for NoopPersistence {}
