use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use ahash::AHashMap;

use crate::auth::Principal;
use crate::radio::RadioDescriptor;
use crate::session::types::{Session, SessionCounters};

struct Inner {
    by_client: AHashMap<SocketAddr, Session>,
    by_radio: AHashMap<SocketAddr, SocketAddr>,
    next_session_id: u64,
    created_total: u64,
    expired_total: u64,
    idle_total: u64,
}

/// Table-wide session counts, for logging/debugging. Aggregate
/// Prometheus series live on [`crate::telemetry::Metrics`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableStats {
    pub active: usize,
    pub created_total: u64,
    pub expired_total: u64,
    pub idle_total: u64,
}

/// Client<->radio session table.
///
/// `by_client` and `by_radio` are always updated together under one
/// lock: a session exists in both or neither, so a reader never
/// observes a client mapping with no corresponding radio mapping (or
/// vice versa). Two separate locks would let exactly that race happen
/// under concurrent create/remove.
pub struct SessionTable {
    inner: Mutex<Inner>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                by_client: AHashMap::new(),
                by_radio: AHashMap::new(),
                next_session_id: 1,
                created_total: 0,
                expired_total: 0,
                idle_total: 0,
            }),
        }
    }

    /// Returns the existing session for `client_addr`, or creates one
    /// bound to `radio` via `principal`, assigning it the next
    /// monotonic session id and an absolute `now + ttl` expiry. The
    /// second element of the tuple is `true` when a new session was
    /// created.
    ///
    /// A session found past its `expires_at` is treated as absent per
    /// invariant 4: it is dropped from both indices here and a fresh
    /// one is created in its place, rather than being handed back
    /// stale.
    pub fn get_or_create(
        &self,
        client_addr: SocketAddr,
        radio: &RadioDescriptor,
        principal: Principal,
        now: Instant,
        ttl: Duration,
    ) -> (Session, bool) {
        let mut inner = self.inner.lock().expect("session table mutex poisoned");
        if let Some(session) = inner.by_client.get(&client_addr) {
            if !session.is_expired(now) {
                return (session.clone(), false);
            }
            let stale = inner.by_client.remove(&client_addr).expect("just observed present");
            inner.by_radio.remove(&stale.radio_control_addr);
            inner.by_radio.remove(&stale.radio_data_addr);
        }

        let session_id = inner.next_session_id;
        inner.next_session_id += 1;

        let session = Session {
            session_id,
            client_addr,
            radio_name: radio.name.clone(),
            radio_control_addr: radio.control_addr,
            radio_data_addr: radio.data_addr,
            principal,
            created_at: now,
            last_activity: now,
            expires_at: now + ttl,
            packets_to_radio: 0,
            bytes_to_radio: 0,
            packets_to_client: 0,
            bytes_to_client: 0,
        };
        inner.by_client.insert(client_addr, session.clone());
        inner.by_radio.insert(radio.data_addr, client_addr);
        inner.by_radio.insert(radio.control_addr, client_addr);
        inner.created_total += 1;
        (session, true)
    }

    /// Updates last-activity and forwarding counters for an existing
    /// session. A no-op if the session was already reaped.
    pub fn record_to_radio(&self, client_addr: SocketAddr, bytes: u64, now: Instant) {
        let mut inner = self.inner.lock().expect("session table mutex poisoned");
        if let Some(session) = inner.by_client.get_mut(&client_addr) {
            session.last_activity = now;
            session.packets_to_radio += 1;
            session.bytes_to_radio += bytes;
        }
    }

    pub fn record_to_client(&self, client_addr: SocketAddr, bytes: u64, now: Instant) {
        let mut inner = self.inner.lock().expect("session table mutex poisoned");
        if let Some(session) = inner.by_client.get_mut(&client_addr) {
            session.last_activity = now;
            session.packets_to_client += 1;
            session.bytes_to_client += bytes;
        }
    }

    /// The client currently bound to a radio address, if any. Used to
    /// route a datagram arriving from the radio back to its client.
    pub fn client_for_radio(&self, radio_addr: SocketAddr) -> Option<SocketAddr> {
        let inner = self.inner.lock().expect("session table mutex poisoned");
        inner.by_radio.get(&radio_addr).copied()
    }

    /// Returns the session for `client_addr`, filtering out one past
    /// its `expires_at` at read time rather than waiting for the next
    /// reaper sweep to remove it (invariant 4).
    pub fn get(&self, client_addr: SocketAddr, now: Instant) -> Option<Session> {
        let inner = self.inner.lock().expect("session table mutex poisoned");
        inner.by_client.get(&client_addr).filter(|s| !s.is_expired(now)).cloned()
    }

    /// Removes a session from both indices, returning it if present.
    pub fn remove(&self, client_addr: SocketAddr) -> Option<Session> {
        let mut inner = self.inner.lock().expect("session table mutex poisoned");
        let session = inner.by_client.remove(&client_addr)?;
        inner.by_radio.remove(&session.radio_control_addr);
        inner.by_radio.remove(&session.radio_data_addr);
        Some(session)
    }

    /// Classifies and removes every session that is expired (`now >
    /// expires_at`) or idle (`now - last_activity > idle_timeout`) as
    /// of `now`, checked in that order so a session that is both is
    /// counted only as expired. Called by the reaper on its sweep
    /// interval; returns the two buckets separately so the caller can
    /// attribute each to its own metric and termination reason.
    pub fn sweep(
        &self,
        now: Instant,
        idle_timeout: Duration,
    ) -> (Vec<Session>, Vec<Session>) {
        let mut inner = self.inner.lock().expect("session table mutex poisoned");

        let mut expired_clients = Vec::new();
        let mut idle_clients = Vec::new();
        for session in inner.by_client.values() {
            if session.is_expired(now) {
                expired_clients.push(session.client_addr);
            } else if session.is_idle(now, idle_timeout) {
                idle_clients.push(session.client_addr);
            }
        }

        let mut remove = |inner: &mut Inner, client_addr: SocketAddr| -> Option<Session> {
            let session = inner.by_client.remove(&client_addr)?;
            inner.by_radio.remove(&session.radio_control_addr);
            inner.by_radio.remove(&session.radio_data_addr);
            Some(session)
        };

        let expired: Vec<Session> =
            expired_clients.into_iter().filter_map(|addr| remove(&mut inner, addr)).collect();
        let idle: Vec<Session> =
            idle_clients.into_iter().filter_map(|addr| remove(&mut inner, addr)).collect();

        inner.expired_total += expired.len() as u64;
        inner.idle_total += idle.len() as u64;

        (expired, idle)
    }

    /// Snapshots every live session's forwarding counters, for a
    /// periodic persistence-hook flush. Returns an empty vec when no
    /// sessions are active.
    pub fn stats_snapshot(&self) -> Vec<SessionCounters> {
        let inner = self.inner.lock().expect("session table mutex poisoned");
        inner.by_client.values().map(Session::snapshot).collect()
    }

    pub fn stats(&self) -> TableStats {
        let inner = self.inner.lock().expect("session table mutex poisoned");
        TableStats {
            active: inner.by_client.len(),
            created_total: inner.created_total,
            expired_total: inner.expired_total,
            idle_total: inner.idle_total,
        }
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}
