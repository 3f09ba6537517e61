//! Spatial-grid edge discovery
//!
//! Buckets events into a uniform grid whose cell size equals the linking
//! distance (converted to degrees, with the longitude cell width corrected
//! by cos(latitude)), then only evaluates candidate pairs within the same or
//! the 8 adjacent cells. With cells at least one linking distance wide in
//! both axes, that neighborhood is guaranteed to contain every point within
//! range, so the resulting partition matches the direct strategy exactly.
//!
//! The grid is sized once per computation from the input's bounding box.
//! Any degenerate geometry (non-finite bounds, near-polar latitudes, zero
//! cell spans, oversized grids) is reported as a [`GridError`] so the caller
//! can fall back to the direct strategy.

use std::collections::HashMap;

use crate::error::GridError;
use crate::geo;
use crate::types::EarthquakeEvent;

use super::union_find::UnionFind;

/// Guard rails for grid construction, taken from the engine configuration
#[derive(Debug, Clone, Copy)]
pub struct GridLimits {
    /// Ceiling on the projected number of cells
    pub max_cells: u64,

    /// Largest absolute latitude the cos(lat) correction is trusted at
    pub max_abs_latitude_deg: f64,
}

/// Discover linking edges with the spatial grid and apply them to `uf`
///
/// Returns an error without touching `uf` when the grid cannot be built
/// safely; edge evaluation itself cannot fail.
pub fn link_events(
    events: &[EarthquakeEvent],
    max_distance_km: f64,
    limits: GridLimits,
    uf: &mut UnionFind,
) -> Result<(), GridError> {
    let grid = SpatialGrid::build(events, max_distance_km, limits)?;

    for (&(row, col), members) in &grid.cells {
        for (slot, &i) in members.iter().enumerate() {
            // Same cell: remaining members after i's slot
            for &j in &members[slot + 1..] {
                link_if_close(events, max_distance_km, i, j, uf);
            }
            // Adjacent cells: only the 4 "forward" neighbors so each
            // cell pair is visited once
            for (dr, dc) in [(0, 1), (1, -1), (1, 0), (1, 1)] {
                if let Some(neighbors) = grid.cells.get(&(row + dr, col + dc)) {
                    for &j in neighbors {
                        link_if_close(events, max_distance_km, i, j, uf);
                    }
                }
            }
        }
    }

    Ok(())
}

fn link_if_close(
    events: &[EarthquakeEvent],
    max_distance_km: f64,
    i: usize,
    j: usize,
    uf: &mut UnionFind,
) {
    let a = &events[i];
    let b = &events[j];
    if geo::haversine_km(a.latitude, a.longitude, b.latitude, b.longitude) <= max_distance_km {
        uf.union(i, j);
    }
}

/// Uniform grid mapping cell coordinates to event indices
struct SpatialGrid {
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    fn build(
        events: &[EarthquakeEvent],
        max_distance_km: f64,
        limits: GridLimits,
    ) -> Result<Self, GridError> {
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;

        for event in events {
            // min/max fold would pass a NaN coordinate through as the
            // other operand, so each coordinate is checked explicitly
            if !(event.latitude.is_finite() && event.longitude.is_finite()) {
                return Err(GridError::NonFiniteBounds);
            }
            min_lat = min_lat.min(event.latitude);
            max_lat = max_lat.max(event.latitude);
            min_lon = min_lon.min(event.longitude);
            max_lon = max_lon.max(event.longitude);
        }

        // Only an empty input leaves the bounds unset at this point
        if !(min_lat.is_finite() && max_lat.is_finite() && min_lon.is_finite() && max_lon.is_finite())
        {
            return Err(GridError::NonFiniteBounds);
        }

        let max_abs_lat = min_lat.abs().max(max_lat.abs());
        if max_abs_lat > limits.max_abs_latitude_deg {
            return Err(GridError::PolarBounds {
                latitude: max_abs_lat,
                limit: limits.max_abs_latitude_deg,
            });
        }

        let lat_span = geo::latitude_degrees_for_km(max_distance_km);
        // Longitude degrees per km are largest at the highest latitude in
        // the box; sizing cells for that latitude keeps the 8-neighborhood
        // guarantee everywhere in the box
        let lon_span = geo::longitude_degrees_for_km(max_distance_km, max_abs_lat);

        if !(lat_span.is_finite() && lon_span.is_finite()) || lat_span <= 0.0 || lon_span <= 0.0 {
            return Err(GridError::DegenerateCellSpan { lat_span, lon_span });
        }

        let rows = ((max_lat - min_lat) / lat_span).floor() as u64 + 1;
        let cols = ((max_lon - min_lon) / lon_span).floor() as u64 + 1;
        let projected = rows.saturating_mul(cols);
        if projected > limits.max_cells {
            return Err(GridError::TooManyCells {
                cells: projected,
                limit: limits.max_cells,
            });
        }

        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (index, event) in events.iter().enumerate() {
            let row = ((event.latitude - min_lat) / lat_span).floor() as i64;
            let col = ((event.longitude - min_lon) / lon_span).floor() as i64;
            cells.entry((row, col)).or_default().push(index);
        }

        Ok(Self { cells })
    }
}
