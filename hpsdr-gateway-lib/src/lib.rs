#![forbid(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod persistence;
pub mod protocol;
pub mod radio;
pub mod session;
pub mod telemetry;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

pub use config::{load_from_path, Config};
pub use error::{GatewayError, Result};

use auth::{Authenticator, DenyAllAuthenticator, NoopAuthenticator};
use gateway::Engine;
use persistence::{NoopPersistence, PersistenceHook};
use session::SessionTable;
use telemetry::Metrics;

/// Wires together the session table, engine, reaper and (optionally)
/// observability server, then runs until SIGINT/SIGTERM.
///
/// `authenticator` and `persistence` default to [`NoopAuthenticator`]
/// (or [`DenyAllAuthenticator`] when `security.require_authentication`
/// is set with none supplied) and [`NoopPersistence`] respectively,
/// since real identity and storage backends are outside the core
/// gateway's scope.
///
/// `radio_ready` is flipped to `true` once the engine has resolved at
/// least one radio, and back to `false` if it never does; share the
/// same flag with [`telemetry::start_observability_server`] to back
/// its `/ready` endpoint with real engine state.
pub async fn run(
    config: Config,
    metrics: Arc<Metrics>,
    authenticator: Option<Arc<dyn Authenticator>>,
    persistence: Option<Arc<dyn PersistenceHook>>,
    radio_ready: Arc<AtomicBool>,
) -> Result<()> {
    let authenticator = authenticator.unwrap_or_else(|| {
        if config.security.require_authentication {
            Arc::new(DenyAllAuthenticator)
        } else {
            Arc::new(NoopAuthenticator)
        }
    });
    let persistence = persistence.unwrap_or_else(|| Arc::new(NoopPersistence));

    let session_table = Arc::new(SessionTable::new());
    let shutdown = CancellationToken::new();

    let engine = Engine::bind(
        &config,
        session_table.clone(),
        authenticator,
        persistence.clone(),
        metrics.clone(),
        radio_ready,
    )
    .await?;

    let reaper_handle = tokio::spawn(session::run_reaper(
        session_table.clone(),
        persistence.clone(),
        metrics,
        Duration::from_secs(config.proxy.reaper_interval_s),
        Duration::from_secs(config.proxy.session_timeout_s),
        shutdown.clone(),
    ));

    let flusher_handle = config.performance.stats_enabled.then(|| {
        tokio::spawn(session::run_stats_flusher(
            session_table,
            persistence,
            Duration::from_secs(config.performance.stats_interval_s),
            shutdown.clone(),
        ))
    });

    info!("hpsdr gateway running");
    engine.run(shutdown.clone()).await?;

    shutdown.cancel();
    let _ = reaper_handle.await;
    if let Some(handle) = flusher_handle {
        let _ = handle.await;
    }

    Ok(())
}
