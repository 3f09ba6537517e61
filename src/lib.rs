//! Quake Clusters - Spatio-temporal clustering engine for earthquake feeds
//!
//! This library groups earthquake events into spatial clusters and scores
//! them for significance:
//! - Connected-component clustering over great-circle distance (union-find)
//! - Direct O(n²) and spatial-grid edge discovery strategies with
//!   transparent fallback
//! - Per-cluster derived metrics (centroid, radius, magnitude and depth
//!   statistics, time span)
//! - Significance classification gating durable persistence
//! - Deterministic stable keys and human-readable slugs for persisted
//!   cluster definitions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod persist;
pub mod significance;
pub mod slug;
pub mod stats;
pub mod types;
pub mod validate;

/// Prometheus metrics and telemetry
pub mod metrics;

// Re-export main types
pub use config::EngineConfig;
pub use engine::ClusterEngine;
pub use error::{Error, Result, ValidationError};
pub use persist::{MemoryGateway, PersistenceGateway};
pub use types::{
    ClusterDefinition, ClusterRequest, ClusterResponse, ClusterResult, EarthquakeEvent,
};
