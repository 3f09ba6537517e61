//! Cluster metric calculation
//!
//! Computes the derived statistics for one retained group in two passes:
//! a single aggregate pass over the members (magnitude min/mean/max, depth
//! range, time span, strongest member, coordinate centroid) followed by a
//! radius pass measuring the great-circle distance from the centroid to each
//! member. The centroid is the plain arithmetic mean of coordinates and the
//! mean magnitude is the arithmetic mean; nothing is area- or
//! energy-weighted.

use crate::error::{Error, Result};
use crate::geo;
use crate::types::{ClusterResult, EarthquakeEvent};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Compute all metrics for the group of `events` selected by `members`
///
/// `members` must be non-empty and in range; a violation is an engine
/// defect and reported as `Error::Internal`, never as a validation error.
/// `significance_score` is left at 0.0 for the classifier to fill in.
pub fn summarize(events: &[EarthquakeEvent], members: &[usize]) -> Result<ClusterResult> {
    if members.is_empty() {
        return Err(Error::Internal(
            "metric calculation invoked on an empty group".to_string(),
        ));
    }
    if let Some(&bad) = members.iter().find(|&&m| m >= events.len()) {
        return Err(Error::Internal(format!(
            "group member index {bad} out of range for {} events",
            events.len()
        )));
    }

    let mut min_magnitude = f64::INFINITY;
    let mut max_magnitude = f64::NEG_INFINITY;
    let mut magnitude_sum = 0.0;
    let mut min_depth = f64::INFINITY;
    let mut max_depth = f64::NEG_INFINITY;
    let mut start_time = i64::MAX;
    let mut end_time = i64::MIN;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    let mut strongest: &EarthquakeEvent = &events[members[0]];
    let mut earthquake_ids = Vec::with_capacity(members.len());

    for &m in members {
        let event = &events[m];
        earthquake_ids.push(event.id.clone());

        min_magnitude = min_magnitude.min(event.magnitude);
        max_magnitude = max_magnitude.max(event.magnitude);
        magnitude_sum += event.magnitude;
        min_depth = min_depth.min(event.depth_km);
        max_depth = max_depth.max(event.depth_km);
        start_time = start_time.min(event.time);
        end_time = end_time.max(event.time);
        lat_sum += event.latitude;
        lon_sum += event.longitude;

        if stronger_than(event, strongest) {
            strongest = event;
        }
    }

    let count = members.len() as f64;
    let centroid_lat = lat_sum / count;
    let centroid_lon = lon_sum / count;

    // Second pass: radius is the farthest member from the centroid
    let radius_km = members
        .iter()
        .map(|&m| {
            let event = &events[m];
            geo::haversine_km(centroid_lat, centroid_lon, event.latitude, event.longitude)
        })
        .fold(0.0, f64::max);

    Ok(ClusterResult {
        earthquake_ids,
        quake_count: members.len(),
        max_magnitude,
        mean_magnitude: magnitude_sum / count,
        min_magnitude,
        depth_range: (min_depth, max_depth),
        centroid_lat,
        centroid_lon,
        radius_km,
        start_time,
        end_time,
        duration_hours: (end_time - start_time) as f64 / MILLIS_PER_HOUR,
        strongest_quake_id: strongest.id.clone(),
        location_name: strongest.place.clone(),
        significance_score: 0.0,
    })
}

/// Strongest-member ordering: magnitude desc, then time asc, then id asc
fn stronger_than(candidate: &EarthquakeEvent, current: &EarthquakeEvent) -> bool {
    if candidate.magnitude != current.magnitude {
        return candidate.magnitude > current.magnitude;
    }
    if candidate.time != current.time {
        return candidate.time < current.time;
    }
    candidate.id < current.id
}
