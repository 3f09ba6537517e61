//! Core data types used throughout the clustering engine
//!
//! This module defines the data structures flowing through a computation:
//!
//! # Key Types
//!
//! - **`EarthquakeEvent`**: A validated earthquake record (id, time,
//!   magnitude, coordinates, depth, place)
//! - **`ClusterRequest`**: One computation call (raw event list + parameters
//!   + passthrough context fields)
//! - **`ClusterResult`**: Derived metrics for one retained cluster
//! - **`ClusterDefinition`**: The persisted record for a significant cluster
//! - **`ClusterResponse`**: All retained clusters plus echoed context
//!
//! Wire names use camelCase to match the upstream feed conventions.
//!
//! # Example
//!
//! ```rust
//! use quake_clusters::types::{ClusterRequest, EarthquakeEvent};
//!
//! let events = vec![
//!     EarthquakeEvent::new("q1", 1_700_000_000_000, 3.2, 35.0, -117.5, 8.0),
//!     EarthquakeEvent::new("q2", 1_700_000_600_000, 2.8, 35.01, -117.51, 5.0),
//! ];
//! let request = ClusterRequest::from_events(&events, 10.0, 2);
//! assert_eq!(request.max_distance_km, Some(serde_json::json!(10.0)));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A single validated earthquake event
///
/// Produced by the input validator from raw GeoJSON-shaped feature records.
/// Immutable for the duration of one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeEvent {
    /// Opaque unique identifier
    pub id: String,

    /// Occurrence instant, epoch milliseconds
    pub time: i64,

    /// Magnitude; 0.0 when the feed carried none
    pub magnitude: f64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Depth below surface in kilometers; 0.0 when absent
    pub depth_km: f64,

    /// Free-text location description from the feed
    pub place: Option<String>,
}

impl EarthquakeEvent {
    /// Convenience constructor for programmatic event creation
    pub fn new(
        id: impl Into<String>,
        time: i64,
        magnitude: f64,
        latitude: f64,
        longitude: f64,
        depth_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            time,
            magnitude,
            latitude,
            longitude,
            depth_km,
            place: None,
        }
    }

    /// Set the human-readable place description
    #[must_use]
    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// Render this event as the GeoJSON-shaped feature record the
    /// validator accepts (`[longitude, latitude, depth]` coordinate order)
    pub fn to_feature(&self) -> Value {
        json!({
            "id": self.id,
            "properties": {
                "mag": self.magnitude,
                "time": self.time,
                "place": self.place,
            },
            "geometry": {
                "type": "Point",
                "coordinates": [self.longitude, self.latitude, self.depth_km],
            },
        })
    }
}

/// One clustering computation call
///
/// `earthquakes` is kept as raw JSON so the validator can distinguish
/// "not a list" from "empty list" and report per-event field problems with
/// the offending index. `last_fetch_time` and `time_window_hours` are caller
/// bookkeeping, echoed back unchanged and never read by the algorithm.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    /// Raw list of GeoJSON-shaped earthquake feature records
    #[serde(default)]
    pub earthquakes: Value,

    /// Maximum great-circle distance (km) for two events to be linked
    ///
    /// Raw JSON so a wrong-typed value reaches the validator's itemized
    /// error instead of failing deserialization of the whole request
    #[serde(default)]
    pub max_distance_km: Option<Value>,

    /// Minimum member count for a group to be reported as a cluster
    #[serde(default)]
    pub min_quakes: Option<Value>,

    /// Passthrough: when the caller last fetched the upstream feed
    #[serde(default)]
    pub last_fetch_time: Option<Value>,

    /// Passthrough: the caller's feed query window in hours
    #[serde(default)]
    pub time_window_hours: Option<Value>,
}

impl ClusterRequest {
    /// Build a request from typed events (primarily for embedding and tests)
    pub fn from_events(events: &[EarthquakeEvent], max_distance_km: f64, min_quakes: u32) -> Self {
        Self {
            earthquakes: Value::Array(events.iter().map(EarthquakeEvent::to_feature).collect()),
            // A non-finite distance has no JSON rendering and is left
            // missing for the validator to reject
            max_distance_km: serde_json::Number::from_f64(max_distance_km).map(Value::Number),
            min_quakes: Some(json!(min_quakes)),
            last_fetch_time: None,
            time_window_hours: None,
        }
    }
}

/// Validated clustering parameters extracted from a [`ClusterRequest`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Maximum linking distance in kilometers (finite, > 0)
    pub max_distance_km: f64,

    /// Minimum cluster size (>= 1)
    pub min_quakes: usize,
}

/// Derived metrics for one retained cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    /// Member event ids in discovery order
    pub earthquake_ids: Vec<String>,

    /// Number of member events
    pub quake_count: usize,

    /// Highest member magnitude
    pub max_magnitude: f64,

    /// Arithmetic mean of member magnitudes
    pub mean_magnitude: f64,

    /// Lowest member magnitude
    pub min_magnitude: f64,

    /// (min, max) of member depths in kilometers
    pub depth_range: (f64, f64),

    /// Arithmetic mean of member latitudes
    pub centroid_lat: f64,

    /// Arithmetic mean of member longitudes
    pub centroid_lon: f64,

    /// Maximum great-circle distance from the centroid to any member
    pub radius_km: f64,

    /// Earliest member time, epoch milliseconds
    pub start_time: i64,

    /// Latest member time, epoch milliseconds
    pub end_time: i64,

    /// `(end_time - start_time)` in hours
    pub duration_hours: f64,

    /// Id of the member with the highest magnitude
    /// (ties: earliest time, then lowest id)
    pub strongest_quake_id: String,

    /// `place` of the strongest member
    pub location_name: Option<String>,

    /// Composite significance score (monotone in count and max magnitude)
    pub significance_score: f64,
}

/// Persisted record for a significant cluster
///
/// Upserted by stable key; `updated_at` is refreshed on every write even
/// when the cluster content is unchanged. Never deleted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDefinition {
    /// Deterministic upsert key (`overview_cluster_{strongestId}_{count}`)
    pub stable_key: String,

    /// Human-readable URL-safe slug
    pub slug: String,

    /// Short human title
    pub title: String,

    /// One-paragraph human description
    pub description: String,

    /// The full metric set for the cluster
    #[serde(flatten)]
    pub cluster: ClusterResult,

    /// Write-time timestamp, epoch milliseconds
    pub updated_at: i64,
}

/// Response of one clustering computation
///
/// Contains every retained cluster, significant or not; significance only
/// gates persistence. Order of `clusters` is not guaranteed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    /// All retained clusters
    pub clusters: Vec<ClusterResult>,

    /// Echoed from the request, untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetch_time: Option<Value>,

    /// Echoed from the request, untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window_hours: Option<Value>,
}
