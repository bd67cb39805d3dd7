use opentelemetry::global;
use opentelemetry::metrics::{Counter, Meter, UpDownCounter};
use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::Registry;
use std::sync::Arc;

/// Direction a packet travelled, used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToRadio,
    ToClient,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::ToRadio => "to_radio",
            Direction::ToClient => "to_client",
        }
    }
}

#[derive(Clone)]
pub struct Metrics {
    packets_received_total: Counter<u64>,
    bytes_received_total: Counter<u64>,
    packets_forwarded_total: Counter<u64>,
    bytes_forwarded_total: Counter<u64>,
    errors_total: Counter<u64>,
    dropped_total: Counter<u64>,
    sessions_total: Counter<u64>,
    sessions_active: UpDownCounter<i64>,
    sessions_expired_total: Counter<u64>,
    sessions_idle_total: Counter<u64>,
}

impl Metrics {
    fn new(meter: Meter) -> Self {
        Self {
            packets_received_total: meter
                .u64_counter("gateway_packets_received_total")
                .with_description("Total number of UDP datagrams received from any source")
                .build(),
            bytes_received_total: meter
                .u64_counter("gateway_bytes_received_total")
                .with_description("Total number of bytes received from any source")
                .build(),
            packets_forwarded_total: meter
                .u64_counter("gateway_packets_forwarded_total")
                .with_description("Total number of UDP datagrams forwarded, by direction")
                .build(),
            bytes_forwarded_total: meter
                .u64_counter("gateway_bytes_forwarded_total")
                .with_description("Total number of bytes forwarded, by direction")
                .build(),
            errors_total: meter
                .u64_counter("gateway_errors_total")
                .with_description("Total number of errors encountered while servicing packets")
                .build(),
            dropped_total: meter
                .u64_counter("gateway_dropped_total")
                .with_description("Total number of packets dropped, by reason")
                .build(),
            sessions_total: meter
                .u64_counter("gateway_sessions_total")
                .with_description("Total number of sessions created")
                .build(),
            sessions_active: meter
                .i64_up_down_counter("gateway_sessions_active")
                .with_description("Number of sessions currently tracked")
                .build(),
            sessions_expired_total: meter
                .u64_counter("gateway_sessions_expired_total")
                .with_description("Total number of sessions reaped for inactivity")
                .build(),
            sessions_idle_total: meter
                .u64_counter("gateway_sessions_idle_total")
                .with_description("Total number of reaper sweeps that found an idle session")
                .build(),
        }
    }

    pub fn record_received(&self, bytes: u64) {
        self.packets_received_total.add(1, &[]);
        self.bytes_received_total.add(bytes, &[]);
    }

    pub fn record_forwarded(&self, direction: Direction, bytes: u64) {
        let attrs = [KeyValue::new("direction", direction.as_str())];
        self.packets_forwarded_total.add(1, &attrs);
        self.bytes_forwarded_total.add(bytes, &attrs);
    }

    pub fn record_error(&self) {
        self.errors_total.add(1, &[]);
    }

    pub fn record_dropped(&self, reason: &'static str) {
        self.dropped_total.add(1, &[KeyValue::new("reason", reason)]);
    }

    pub fn record_session_created(&self) {
        self.sessions_total.add(1, &[]);
        self.sessions_active.add(1, &[]);
    }

    pub fn record_session_expired(&self) {
        self.sessions_active.add(-1, &[]);
        self.sessions_expired_total.add(1, &[]);
    }

    pub fn record_session_idle_sweep(&self) {
        self.sessions_idle_total.add(1, &[]);
    }
}

pub fn init_metrics() -> Result<(Arc<Metrics>, Registry), Box<dyn std::error::Error + Send + Sync>>
{
    let registry = Registry::default();

    let exporter = opentelemetry_prometheus::exporter()
        .with_registry(registry.clone())
        .build()?;

    let meter_provider = SdkMeterProvider::builder().with_reader(exporter).build();

    global::set_meter_provider(meter_provider);

    let meter = global::meter("hpsdr-gateway");
    let metrics = Arc::new(Metrics::new(meter));

    Ok((metrics, registry))
}
