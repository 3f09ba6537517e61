//! Metrics and telemetry for the clustering engine
//!
//! Prometheus metrics covering computation outcomes, strategy fallbacks,
//! and background persistence health.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};

lazy_static! {
    // === Computation Counters ===

    /// Clustering computations by outcome
    pub static ref COMPUTATIONS_TOTAL: CounterVec = register_counter_vec!(
        "quake_cluster_computations_total",
        "Clustering computations by outcome",
        &["status"]
    ).unwrap();

    /// Spatial-grid strategy failures recovered by direct fallback
    pub static ref GRID_FALLBACKS_TOTAL: Counter = register_counter!(
        "quake_cluster_grid_fallbacks_total",
        "Grid strategy failures recovered by falling back to the direct strategy"
    ).unwrap();

    /// Background upsert failures (logged, never surfaced)
    pub static ref PERSISTENCE_FAILURES_TOTAL: Counter = register_counter!(
        "quake_cluster_persistence_failures_total",
        "Failed background cluster definition upserts"
    ).unwrap();

    // === Latency / Size Histograms ===

    /// Wall time of one synchronous computation
    pub static ref COMPUTE_DURATION: Histogram = register_histogram!(
        "quake_cluster_compute_duration_seconds",
        "Clustering computation latency in seconds",
        vec![0.0001, 0.001, 0.01, 0.1, 0.5, 1.0, 5.0]
    ).unwrap();

    /// Retained clusters per computation
    pub static ref CLUSTERS_RETURNED: Histogram = register_histogram!(
        "quake_cluster_clusters_returned",
        "Number of retained clusters per computation",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0]
    ).unwrap();
}

/// Render all registered metrics in Prometheus text exposition format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_register_and_gather() {
        COMPUTATIONS_TOTAL.with_label_values(&["ok"]).inc();
        GRID_FALLBACKS_TOTAL.inc();
        let rendered = gather();
        assert!(rendered.contains("quake_cluster_computations_total"));
    }
}
