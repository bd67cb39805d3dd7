use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::persistence::PersistenceHook;
use crate::session::table::SessionTable;

/// Background task that snapshots every live session's counters on a
/// fixed interval and hands them to the persistence hook. Only spawned
/// when `performance.stats_enabled` is set; otherwise the snapshot
/// work and the hook call are both skipped entirely.
pub async fn run(
    table: Arc<SessionTable>,
    persistence: Arc<dyn PersistenceHook>,
    flush_interval: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(flush_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("stats flusher stopping");
                break;
            }
            _ = ticker.tick() => {
                let snapshots = table.stats_snapshot();
                debug!(count = snapshots.len(), "flushing session stats");
                persistence.record_stats_interval(&snapshots).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use crate::persistence::{NoopPersistence, SessionMeta};
    use crate::radio::RadioDescriptor;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Default)]
    struct RecordingPersistence {
        flushes: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl PersistenceHook for RecordingPersistence {
        async fn record_session_created(&self, _meta: &SessionMeta) {}
        async fn record_stats_interval(&self, snapshots: &[crate::session::SessionCounters]) {
            self.flushes.lock().unwrap().push(snapshots.len());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn flushes_live_session_counters_on_interval() {
        let table = Arc::new(SessionTable::new());
        let radio = RadioDescriptor {
            name: "r1".into(),
            hostname: "127.0.0.1".into(),
            control_addr: "127.0.0.1:1024".parse().unwrap(),
            data_addr: "127.0.0.1:1024".parse().unwrap(),
            resolved: true,
        };
        let client: std::net::SocketAddr = "127.0.0.1:5000".parse().unwrap();
        table.get_or_create(
            client,
            &radio,
            Principal::Anonymous,
            Instant::now(),
            Duration::from_secs(3600),
        );

        let persistence = Arc::new(RecordingPersistence::default());
        let persistence_dyn: Arc<dyn PersistenceHook> = persistence.clone();
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let handle = tokio::spawn(run(
            table.clone(),
            persistence_dyn,
            Duration::from_secs(1),
            shutdown_clone,
        ));

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert_eq!(persistence.flushes.lock().unwrap().as_slice(), &[1]);

        shutdown.cancel();
        let _ = tokio::time::timeout(Duration::from_secs(1), handle).await;
        let _ = NoopPersistence;
    }
}
