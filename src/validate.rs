//! Request validation
//!
//! Fail-fast validation of a raw [`ClusterRequest`] before any computation:
//! parameters first, then every event record in order. Any single invalid
//! event invalidates the whole request; the reported error carries the first
//! offending index and field. Nothing downstream ever sees a partially
//! validated input.
//!
//! Event records are GeoJSON-shaped features: a non-null `id`, an object
//! `properties` with a numeric `time`, and an object `geometry` whose
//! `coordinates` is `[longitude, latitude, depth?]` with at least two finite
//! numbers. `mag`/`place`/depth are optional.

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{ClusterParams, ClusterRequest, EarthquakeEvent};

/// Validate a request and extract the typed event list and parameters
pub fn validate_request(
    request: &ClusterRequest,
) -> Result<(Vec<EarthquakeEvent>, ClusterParams), ValidationError> {
    let features = match &request.earthquakes {
        Value::Array(features) => features,
        _ => return Err(ValidationError::NotAList),
    };
    if features.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let params = validate_params(request)?;

    let mut events = Vec::with_capacity(features.len());
    for (index, feature) in features.iter().enumerate() {
        events.push(validate_event(index, feature)?);
    }

    Ok((events, params))
}

/// Validate `maxDistanceKm` and `minQuakes`
///
/// The parameters arrive as raw JSON so a wrong-typed value (a string, a
/// list) still produces the itemized parameter error rather than a generic
/// deserialization failure.
fn validate_params(request: &ClusterRequest) -> Result<ClusterParams, ValidationError> {
    let max_distance_km = match request.max_distance_km.as_ref().and_then(finite_number) {
        Some(v) if v > 0.0 => v,
        _ => {
            return Err(ValidationError::InvalidMaxDistance {
                got: render_param(request.max_distance_km.as_ref()),
            })
        }
    };

    let min_quakes = match request.min_quakes.as_ref().and_then(finite_number) {
        Some(v) if v.fract() == 0.0 && v >= 1.0 => v as usize,
        _ => {
            return Err(ValidationError::InvalidMinQuakes {
                got: render_param(request.min_quakes.as_ref()),
            })
        }
    };

    Ok(ClusterParams {
        max_distance_km,
        min_quakes,
    })
}

/// Validate one feature record and convert it into a typed event
fn validate_event(index: usize, feature: &Value) -> Result<EarthquakeEvent, ValidationError> {
    let invalid = |field: &'static str, message: &str| ValidationError::InvalidEvent {
        index,
        field,
        message: message.to_string(),
    };

    let obj = feature
        .as_object()
        .ok_or_else(|| invalid("feature", "must be an object"))?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => return Err(invalid("id", "is missing")),
        Some(_) => return Err(invalid("id", "must be a string or number")),
    };

    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("properties", "must be an object"))?;

    let geometry = obj
        .get("geometry")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("geometry", "must be an object"))?;

    let coordinates = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("geometry.coordinates", "must be an array"))?;
    if coordinates.len() < 2 {
        return Err(invalid(
            "geometry.coordinates",
            "must contain at least [longitude, latitude]",
        ));
    }

    let longitude = finite_number(&coordinates[0])
        .ok_or_else(|| invalid("geometry.coordinates", "longitude must be a finite number"))?;
    let latitude = finite_number(&coordinates[1])
        .ok_or_else(|| invalid("geometry.coordinates", "latitude must be a finite number"))?;

    // Third coordinate is depth in km when present; upstream feeds omit it
    // for some networks
    let depth_km = coordinates.get(2).and_then(finite_number).unwrap_or(0.0);

    let time = properties
        .get("time")
        .and_then(finite_number)
        .ok_or_else(|| invalid("properties.time", "must be a numeric timestamp"))?
        as i64;

    // Feeds ship null magnitudes for unreviewed events
    let magnitude = properties.get("mag").and_then(finite_number).unwrap_or(0.0);

    let place = properties
        .get("place")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(EarthquakeEvent {
        id,
        time,
        magnitude,
        latitude,
        longitude,
        depth_km,
        place,
    })
}

fn finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn render_param(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "missing".to_string(),
    }
}
