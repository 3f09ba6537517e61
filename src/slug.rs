//! Stable keys, slugs, and persisted-record rendering
//!
//! Two identifiers are built for every significant cluster:
//!
//! - The **stable key** `overview_cluster_{strongestQuakeId}_{quakeCount}`
//!   addresses the persisted row for upserts; the same physical cluster maps
//!   to the same row as long as its strongest member and size are unchanged.
//! - The **slug**
//!   `{quakeCount}-quakes-near-{locationSlug}-up-to-m{maxMag}-{strongestQuakeId}`
//!   is the human-readable, URL-safe rendering, with the max magnitude at
//!   one decimal place.
//!
//! Location normalization lower-cases, replaces anything outside
//! `[a-z0-9]` with hyphens, collapses runs, and trims the ends. A missing or
//! empty location falls back to a fixed placeholder so no slug ever carries
//! an empty segment.

use crate::types::{ClusterDefinition, ClusterResult};

/// Slug segment used when a cluster has no usable location name
pub const LOCATION_FALLBACK_SLUG: &str = "unknown-location";

/// Prose rendering of the missing-location fallback
pub const LOCATION_FALLBACK_NAME: &str = "an unknown location";

/// Deterministic upsert key for a significant cluster
pub fn stable_key(strongest_quake_id: &str, quake_count: usize) -> String {
    format!("overview_cluster_{strongest_quake_id}_{quake_count}")
}

/// Human-readable URL-safe slug for a significant cluster
pub fn cluster_slug(result: &ClusterResult) -> String {
    format!(
        "{}-quakes-near-{}-up-to-m{:.1}-{}",
        result.quake_count,
        slugify_location(result.location_name.as_deref()),
        result.max_magnitude,
        result.strongest_quake_id,
    )
}

/// Normalize a location name into a `[a-z0-9-]` slug segment
pub fn slugify_location(name: Option<&str>) -> String {
    let Some(name) = name else {
        return LOCATION_FALLBACK_SLUG.to_string();
    };

    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        LOCATION_FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Short human title for the persisted record
pub fn title(result: &ClusterResult) -> String {
    format!(
        "{} earthquakes near {}",
        result.quake_count,
        location_or_fallback(result)
    )
}

/// One-paragraph human description for the persisted record
pub fn description(result: &ClusterResult) -> String {
    format!(
        "A cluster of {} earthquakes near {}, reaching a maximum magnitude of M{:.1}.",
        result.quake_count,
        location_or_fallback(result),
        result.max_magnitude,
    )
}

fn location_or_fallback(result: &ClusterResult) -> &str {
    match result.location_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => LOCATION_FALLBACK_NAME,
    }
}

/// Assemble the full persisted record for a significant cluster
pub fn build_definition(result: &ClusterResult, updated_at: i64) -> ClusterDefinition {
    ClusterDefinition {
        stable_key: stable_key(&result.strongest_quake_id, result.quake_count),
        slug: cluster_slug(result),
        title: title(result),
        description: description(result),
        cluster: result.clone(),
        updated_at,
    }
}
