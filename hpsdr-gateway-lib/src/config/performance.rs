use serde::Deserialize;

/// Statistics collection cadence, consumed by the counters-flusher task.
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Whether the counters-flusher task runs at all.
    #[serde(default)]
    pub stats_enabled: bool,
    /// How often, in seconds, per-session counters are snapshotted and
    /// handed to the persistence hook.
    #[serde(default = "default_stats_interval_s")]
    pub stats_interval_s: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { stats_enabled: false, stats_interval_s: default_stats_interval_s() }
    }
}

fn default_stats_interval_s() -> u64 {
    60
}
