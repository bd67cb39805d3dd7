use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::persistence::PersistenceHook;
use crate::session::table::SessionTable;
use crate::session::types::TerminationReason;
use crate::telemetry::Metrics;

/// Background task that sweeps the session table on a fixed interval,
/// evicting sessions past their absolute expiry separately from ones
/// merely idle past `session_timeout`, and reporting each eviction to
/// metrics and the persistence hook under its own reason. Also gives
/// the persistence hook a chance to expire its own backing rows on the
/// same cadence, via `cleanup_expired`, mirroring the reference
/// implementation's cleanup loop calling `db.cleanup_expired_sessions()`
/// on every tick.
pub async fn run(
    table: Arc<SessionTable>,
    persistence: Arc<dyn PersistenceHook>,
    metrics: Arc<Metrics>,
    sweep_interval: Duration,
    session_timeout: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(sweep_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("session reaper stopping");
                break;
            }
            _ = ticker.tick() => {
                let (expired, idle) = table.sweep(Instant::now(), session_timeout);
                if !expired.is_empty() {
                    info!(count = expired.len(), "reaped expired sessions");
                    for session in expired {
                        metrics.record_session_expired();
                        persistence
                            .record_session_terminated(session.session_id, TerminationReason::Expired)
                            .await;
                    }
                }
                if !idle.is_empty() {
                    info!(count = idle.len(), "reaped idle sessions");
                    for session in idle {
                        metrics.record_session_idle_sweep();
                        persistence
                            .record_session_terminated(session.session_id, TerminationReason::Idle)
                            .await;
                    }
                }
                persistence.cleanup_expired().await;
            }
        }
    }
}
