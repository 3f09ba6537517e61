//! Engine facade
//!
//! [`ClusterEngine`] wires the pipeline together: validate → partition →
//! per-group metrics → significance → (significant only) slug generation
//! and scheduled persistence. Each invocation is a single synchronous
//! computation over an immutable snapshot with no shared mutable state, so
//! concurrent invocations need no coordination; the only cross-call
//! resource is the persistence gateway's store, reached exclusively through
//! fire-and-forget upsert tasks.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::cluster;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::metrics::{CLUSTERS_RETURNED, COMPUTATIONS_TOTAL, COMPUTE_DURATION};
use crate::persist::{self, PersistenceGateway};
use crate::significance;
use crate::slug;
use crate::types::{ClusterDefinition, ClusterRequest, ClusterResponse, ClusterResult};
use crate::validate;

/// The earthquake spatial clustering engine
///
/// # Example
///
/// ```rust
/// use quake_clusters::{ClusterEngine, EngineConfig};
/// use quake_clusters::types::{ClusterRequest, EarthquakeEvent};
///
/// let engine = ClusterEngine::new(EngineConfig::default());
/// let events = vec![
///     EarthquakeEvent::new("q1", 1_700_000_000_000, 3.1, 35.00, -117.50, 7.0),
///     EarthquakeEvent::new("q2", 1_700_000_060_000, 2.4, 35.01, -117.51, 8.0),
/// ];
/// let response = engine.compute(&ClusterRequest::from_events(&events, 10.0, 2)).unwrap();
/// assert_eq!(response.clusters.len(), 1);
/// ```
pub struct ClusterEngine {
    config: EngineConfig,
    gateway: Option<Arc<dyn PersistenceGateway>>,
}

impl ClusterEngine {
    /// Create an engine without a persistence gateway
    ///
    /// Significant clusters are still classified and scored, but nothing is
    /// written anywhere.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            gateway: None,
        }
    }

    /// Attach a persistence gateway for significant cluster definitions
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn PersistenceGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Engine configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one clustering computation without scheduling persistence
    ///
    /// Returns every retained cluster, significant or not.
    pub fn compute(&self, request: &ClusterRequest) -> Result<ClusterResponse> {
        let started = Instant::now();
        let outcome = self.compute_inner(request);
        COMPUTE_DURATION.observe(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(response) => {
                COMPUTATIONS_TOTAL.with_label_values(&["ok"]).inc();
                CLUSTERS_RETURNED.observe(response.clusters.len() as f64);
            }
            Err(Error::Validation(_)) => {
                COMPUTATIONS_TOTAL
                    .with_label_values(&["validation_error"])
                    .inc();
            }
            Err(_) => {
                COMPUTATIONS_TOTAL
                    .with_label_values(&["internal_error"])
                    .inc();
            }
        }

        outcome
    }

    /// Run one clustering computation and schedule upserts for every
    /// significant cluster
    ///
    /// Persistence is best-effort and non-blocking: the response is built
    /// before any upsert task is spawned, and upsert failures never reach
    /// the caller. Without an attached gateway this is identical to
    /// [`compute`](Self::compute).
    pub fn compute_and_persist(&self, request: &ClusterRequest) -> Result<ClusterResponse> {
        let response = self.compute(request)?;

        if let Some(gateway) = &self.gateway {
            let definitions = self.significant_definitions(&response.clusters);
            if !definitions.is_empty() {
                tracing::debug!(
                    definitions = definitions.len(),
                    "Scheduling cluster definition upserts"
                );
                persist::schedule_upserts(Arc::clone(gateway), definitions);
            }
        }

        Ok(response)
    }

    /// Build persisted records for the significant subset of `clusters`
    pub fn significant_definitions(&self, clusters: &[ClusterResult]) -> Vec<ClusterDefinition> {
        let now = Utc::now().timestamp_millis();
        clusters
            .iter()
            .filter(|cluster| significance::is_significant(cluster, &self.config))
            .map(|cluster| slug::build_definition(cluster, now))
            .collect()
    }

    fn compute_inner(&self, request: &ClusterRequest) -> Result<ClusterResponse> {
        let (events, params) = validate::validate_request(request)?;

        let groups = cluster::partition(
            &events,
            params.max_distance_km,
            params.min_quakes,
            &self.config,
        );

        let mut clusters = Vec::with_capacity(groups.len());
        for group in &groups {
            let mut result = crate::stats::summarize(&events, group)?;
            result.significance_score = significance::score(&result);
            clusters.push(result);
        }

        tracing::debug!(
            events = events.len(),
            clusters = clusters.len(),
            max_distance_km = params.max_distance_km,
            min_quakes = params.min_quakes,
            "Clustering computation complete"
        );

        Ok(ClusterResponse {
            clusters,
            last_fetch_time: request.last_fetch_time.clone(),
            time_window_hours: request.time_window_hours.clone(),
        })
    }
}
