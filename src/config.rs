//! Configuration for the clustering engine
//!
//! Provides TOML-loadable configuration with serde field defaults. The
//! significance thresholds here are fixed per deployment and independent of
//! the caller-supplied `minQuakes` parameter.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Minimum member count for a cluster to be classified significant
    #[serde(default = "default_cluster_min_quakes")]
    pub cluster_min_quakes: usize,

    /// Minimum max-magnitude for a cluster to be classified significant
    #[serde(default = "default_cluster_min_magnitude")]
    pub defined_cluster_min_magnitude: f64,

    /// Inputs at or below this size always use the direct O(n²) strategy
    #[serde(default = "default_direct_strategy_threshold")]
    pub direct_strategy_threshold: usize,

    /// Ceiling on the projected spatial-grid cell count; exceeding it falls
    /// back to the direct strategy
    #[serde(default = "default_max_grid_cells")]
    pub max_grid_cells: u64,

    /// Absolute latitude beyond which the grid's cos(lat) longitude
    /// correction is considered unreliable; such inputs fall back to the
    /// direct strategy
    #[serde(default = "default_max_grid_latitude")]
    pub max_grid_latitude_deg: f64,
}

// Default value functions
fn default_cluster_min_quakes() -> usize {
    10
}
fn default_cluster_min_magnitude() -> f64 {
    4.5
}
fn default_direct_strategy_threshold() -> usize {
    100
}
fn default_max_grid_cells() -> u64 {
    4_000_000
}
fn default_max_grid_latitude() -> f64 {
    85.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cluster_min_quakes: default_cluster_min_quakes(),
            defined_cluster_min_magnitude: default_cluster_min_magnitude(),
            direct_strategy_threshold: default_direct_strategy_threshold(),
            max_grid_cells: default_max_grid_cells(),
            max_grid_latitude_deg: default_max_grid_latitude(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, applying defaults for missing
    /// fields
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Configuration(format!(
                "failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| Error::Configuration(format!("invalid config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration values are internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.cluster_min_quakes < 1 {
            return Err(Error::Configuration(
                "cluster_min_quakes must be at least 1".to_string(),
            ));
        }
        if !self.defined_cluster_min_magnitude.is_finite() {
            return Err(Error::Configuration(
                "defined_cluster_min_magnitude must be finite".to_string(),
            ));
        }
        if self.direct_strategy_threshold < 1 {
            return Err(Error::Configuration(
                "direct_strategy_threshold must be at least 1".to_string(),
            ));
        }
        if self.max_grid_cells < 1 {
            return Err(Error::Configuration(
                "max_grid_cells must be at least 1".to_string(),
            ));
        }
        if !(0.0..90.0).contains(&self.max_grid_latitude_deg) {
            return Err(Error::Configuration(
                "max_grid_latitude_deg must be in [0, 90)".to_string(),
            ));
        }
        Ok(())
    }
}
