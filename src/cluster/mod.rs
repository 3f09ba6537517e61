//! Clustering Core
//!
//! Partitions a validated event set into disjoint groups using
//! connected-components over great-circle proximity: an edge links two
//! events whose distance is at most the linking threshold, and a group is a
//! maximal transitively connected set.
//!
//! Two edge-discovery strategies feed the same union-find structure:
//!
//! - **Direct**: all C(n,2) pairs; guaranteed correct, quadratic.
//! - **Grid**: spatial bucketing that only evaluates candidates in the same
//!   or adjacent cells; near-linear for typical inputs.
//!
//! Both produce identical partitions. Strategy selection is by input size,
//! and any grid construction error falls back to the direct strategy without
//! surfacing to the caller.

pub mod grid;
pub mod union_find;

use crate::config::EngineConfig;
use crate::error::GridError;
use crate::geo;
use crate::metrics::GRID_FALLBACKS_TOTAL;
use crate::types::EarthquakeEvent;

use grid::GridLimits;
use union_find::UnionFind;

/// Partition events into groups of at least `min_quakes` members
///
/// Groups are index lists into `events`, in discovery order. Groups smaller
/// than `min_quakes` are dropped entirely; their members do not reappear as
/// singleton clusters.
pub fn partition(
    events: &[EarthquakeEvent],
    max_distance_km: f64,
    min_quakes: usize,
    config: &EngineConfig,
) -> Vec<Vec<usize>> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut uf = UnionFind::new(events.len());

    if events.len() <= config.direct_strategy_threshold {
        link_direct(events, max_distance_km, &mut uf);
    } else {
        let limits = GridLimits {
            max_cells: config.max_grid_cells,
            max_abs_latitude_deg: config.max_grid_latitude_deg,
        };
        if let Err(e) = grid::link_events(events, max_distance_km, limits, &mut uf) {
            GRID_FALLBACKS_TOTAL.inc();
            tracing::warn!(
                error = %e,
                events = events.len(),
                "Spatial grid construction failed, falling back to direct strategy"
            );
            // The failed attempt never touches the union-find state, so the
            // direct pass starts from singletons
            link_direct(events, max_distance_km, &mut uf);
        }
    }

    retain_groups(uf.groups(), min_quakes)
}

/// Partition using only the direct O(n²) strategy
pub fn partition_direct(
    events: &[EarthquakeEvent],
    max_distance_km: f64,
    min_quakes: usize,
) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(events.len());
    link_direct(events, max_distance_km, &mut uf);
    retain_groups(uf.groups(), min_quakes)
}

/// Partition using only the spatial-grid strategy
///
/// Exposed for strategy-equivalence testing; production callers go through
/// [`partition`], which handles fallback.
pub fn partition_grid(
    events: &[EarthquakeEvent],
    max_distance_km: f64,
    min_quakes: usize,
    limits: GridLimits,
) -> Result<Vec<Vec<usize>>, GridError> {
    let mut uf = UnionFind::new(events.len());
    grid::link_events(events, max_distance_km, limits, &mut uf)?;
    Ok(retain_groups(uf.groups(), min_quakes))
}

/// Examine every pair and union those within the linking distance
fn link_direct(events: &[EarthquakeEvent], max_distance_km: f64, uf: &mut UnionFind) {
    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            let a = &events[i];
            let b = &events[j];
            if geo::haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
                <= max_distance_km
            {
                uf.union(i, j);
            }
        }
    }
}

fn retain_groups(groups: Vec<Vec<usize>>, min_quakes: usize) -> Vec<Vec<usize>> {
    groups
        .into_iter()
        .filter(|group| group.len() >= min_quakes)
        .collect()
}
