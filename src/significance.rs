//! Significance classification
//!
//! A cluster is significant when it meets both fixed deployment thresholds:
//! member count and maximum magnitude. Significance gates durable
//! persistence only; non-significant clusters are still returned to the
//! caller. The composite score carries no contract beyond being monotone in
//! both inputs.

use crate::config::EngineConfig;
use crate::types::ClusterResult;

/// Weight of the member count in the composite score
const COUNT_WEIGHT: f64 = 2.0;

/// Weight of the maximum magnitude in the composite score
const MAGNITUDE_WEIGHT: f64 = 10.0;

/// Composite significance score: monotone in count and max magnitude
pub fn score(result: &ClusterResult) -> f64 {
    result.quake_count as f64 * COUNT_WEIGHT + result.max_magnitude * MAGNITUDE_WEIGHT
}

/// Whether the cluster qualifies for durable persistence
///
/// Uses the fixed configuration thresholds, independent of the
/// caller-supplied `minQuakes`.
pub fn is_significant(result: &ClusterResult, config: &EngineConfig) -> bool {
    result.quake_count >= config.cluster_min_quakes
        && result.max_magnitude >= config.defined_cluster_min_magnitude
}
