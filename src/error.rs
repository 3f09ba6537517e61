//! Error types for the clustering engine
//!
//! The taxonomy separates caller mistakes (validation), recoverable internal
//! strategy failures (grid construction), background persistence failures,
//! and genuine engine defects:
//!
//! - [`ValidationError`] is itemized and surfaced to the caller immediately;
//!   no partial computation happens.
//! - [`GridError`] never reaches the caller; the engine falls back to the
//!   direct strategy.
//! - [`PersistenceError`] is logged by the gateway layer and never alters
//!   the synchronous response.
//! - `Error::Internal` signals an engine defect (invariant violation),
//!   deliberately distinct from validation failures.

use thiserror::Error;

/// Main error type for the clustering engine
#[derive(Error, Debug)]
pub enum Error {
    /// Request validation failed; the caller's input is at fault
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence gateway failure
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invariant violation inside the engine; indicates a defect, not a
    /// caller mistake
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Itemized request validation errors
///
/// Each variant names the specific field and, for per-event problems, the
/// first offending index. Any single invalid event fails the whole request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `earthquakes` was not a JSON list
    #[error("earthquakes must be a list")]
    NotAList,

    /// `earthquakes` was a list but empty; distinct from `NotAList`
    #[error("no clusters to calculate: earthquake list is empty")]
    EmptyInput,

    /// `maxDistanceKm` missing, non-finite, or not positive
    #[error("maxDistanceKm must be a finite number greater than zero (got {got})")]
    InvalidMaxDistance {
        /// Rendering of the rejected value
        got: String,
    },

    /// `minQuakes` missing, non-finite, non-integral, or below 1
    #[error("minQuakes must be a finite integer of at least 1 (got {got})")]
    InvalidMinQuakes {
        /// Rendering of the rejected value
        got: String,
    },

    /// A single event record failed validation
    #[error("earthquake at index {index}: field '{field}' {message}")]
    InvalidEvent {
        /// Position of the first offending record in the input list
        index: usize,
        /// The missing or malformed field
        field: &'static str,
        /// What was wrong with it
        message: String,
    },
}

/// Spatial-grid construction errors
///
/// Every variant is recovered locally by re-running edge discovery with the
/// direct strategy; none of these are ever surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Bounding box contains a non-finite coordinate
    #[error("bounding box is not finite")]
    NonFiniteBounds,

    /// Bounding box reaches too close to a pole for the cos(lat) longitude
    /// correction to stay bounded
    #[error("bounding box latitude {latitude} exceeds grid limit {limit}")]
    PolarBounds {
        /// Largest absolute latitude in the input
        latitude: f64,
        /// Configured absolute-latitude ceiling
        limit: f64,
    },

    /// Computed cell span was zero, negative, or non-finite
    #[error("degenerate grid cell span: lat {lat_span} deg, lon {lon_span} deg")]
    DegenerateCellSpan {
        /// Latitude span of one cell in degrees
        lat_span: f64,
        /// Longitude span of one cell in degrees
        lon_span: f64,
    },

    /// Projected grid would exceed the configured cell budget
    #[error("grid would need {cells} cells, limit is {limit}")]
    TooManyCells {
        /// Projected number of cells
        cells: u64,
        /// Configured ceiling
        limit: u64,
    },
}

/// Persistence gateway errors
///
/// Logged only; never retried by the engine and never visible to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the write
    #[error("write rejected for key '{key}': {message}")]
    WriteRejected {
        /// Stable key of the rejected definition
        key: String,
        /// Store-supplied reason
        message: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
