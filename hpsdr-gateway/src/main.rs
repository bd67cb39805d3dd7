#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hpsdr_gateway_lib::telemetry::{init_metrics, init_tracing, shutdown_tracing, start_observability_server};
use hpsdr_gateway_lib::{load_from_path, run};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "HPSDR Protocol 1 UDP gateway")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", default_value = "demos/config/basic.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_from_path(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            // Tracing isn't initialized yet (its level comes from config), so
            // a config-load failure is reported on stderr directly.
            eprintln!("failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&config.telemetry.log_level, config.telemetry.show_target) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }

    info!(
        listen_port = config.proxy.listen_port,
        radios = config.radios.len(),
        "configuration loaded"
    );

    let (metrics, registry) = match init_metrics() {
        Ok(v) => v,
        Err(err) => {
            error!(%err, "failed to initialize metrics");
            std::process::exit(1);
        }
    };

    let radio_ready = Arc::new(std::sync::atomic::AtomicBool::new(false));

    if let Some(port) = config.telemetry.metrics_port {
        let registry = registry.clone();
        let radio_ready = radio_ready.clone();
        tokio::spawn(async move {
            if let Err(err) = start_observability_server(port, registry, radio_ready).await {
                error!(%err, "observability server exited with error");
            }
        });
    }

    if let Err(err) = run(config, metrics, None, None, radio_ready).await {
        error!(%err, "gateway exited with error");
        shutdown_tracing();
        std::process::exit(1);
    }

    shutdown_tracing();
}
