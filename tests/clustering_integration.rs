//! Integration tests for the clustering engine
//!
//! These tests validate the complete pipeline:
//! - Validation → partitioning → metrics → significance → persistence
//! - The concrete scenarios from the engine's behavioral contract
//! - Structural invariants of the returned clusters

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use quake_clusters::geo;
use quake_clusters::types::{ClusterRequest, EarthquakeEvent};
use quake_clusters::{ClusterEngine, EngineConfig, MemoryGateway};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Helper Functions
// ============================================================================

fn event(id: &str, time: i64, mag: f64, lat: f64, lon: f64) -> EarthquakeEvent {
    EarthquakeEvent::new(id, time, mag, lat, lon, 10.0)
}

/// Three events within ~5 km of each other plus one ~500 km away
fn near_triplet_and_far() -> Vec<EarthquakeEvent> {
    vec![
        event("n1", 1_000, 2.1, 35.000, -117.000),
        event("n2", 2_000, 3.4, 35.020, -117.010),
        event("n3", 3_000, 2.8, 35.010, -117.030),
        event("far", 4_000, 4.9, 39.500, -117.000),
    ]
}

/// `count` events scattered uniformly over a wide area
fn scattered(count: usize, seed: u64) -> Vec<EarthquakeEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let lat = rng.gen_range(30.0..45.0);
            let lon = rng.gen_range(-125.0..-100.0);
            let mag = rng.gen_range(1.0..6.0);
            event(&format!("s{i}"), i as i64 * 60_000, mag, lat, lon)
        })
        .collect()
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn near_triplet_clusters_and_far_event_is_excluded() {
    let engine = ClusterEngine::new(EngineConfig::default());
    let request = ClusterRequest::from_events(&near_triplet_and_far(), 10.0, 2);

    let response = engine.compute(&request).unwrap();

    assert_eq!(response.clusters.len(), 1);
    let cluster = &response.clusters[0];
    assert_eq!(cluster.quake_count, 3);

    let ids: HashSet<&str> = cluster.earthquake_ids.iter().map(String::as_str).collect();
    assert_eq!(ids, HashSet::from(["n1", "n2", "n3"]));
    // The far event is not reported as a singleton cluster either
    assert!(!response
        .clusters
        .iter()
        .any(|c| c.earthquake_ids.contains(&"far".to_string())));
}

#[test]
fn scattered_150_events_grid_and_direct_agree_end_to_end() {
    let events = scattered(150, 7);
    let config = EngineConfig::default();
    // 150 events exceed the direct threshold, so compute() takes the grid path
    assert!(events.len() > config.direct_strategy_threshold);

    let engine = ClusterEngine::new(config);
    let request = ClusterRequest::from_events(&events, 50.0, 2);
    let response = engine.compute(&request).unwrap();

    let direct_groups = quake_clusters::cluster::partition_direct(&events, 50.0, 2);

    let from_engine: HashSet<Vec<String>> = response
        .clusters
        .iter()
        .map(|c| {
            let mut ids = c.earthquake_ids.clone();
            ids.sort();
            ids
        })
        .collect();
    let from_direct: HashSet<Vec<String>> = direct_groups
        .iter()
        .map(|group| {
            let mut ids: Vec<String> = group.iter().map(|&i| events[i].id.clone()).collect();
            ids.sort();
            ids
        })
        .collect();

    assert_eq!(from_engine, from_direct);
}

#[tokio::test]
async fn significant_cluster_is_upserted_with_expected_slug() {
    // 12 events within a few km, max magnitude 5.2
    let mut events = Vec::new();
    for i in 0..12i64 {
        let mag = if i == 0 { 5.2 } else { 3.0 };
        let mut e = event(
            &format!("sig{i}"),
            i * 60_000,
            mag,
            36.0 + i as f64 * 0.001,
            -118.0,
        );
        if i == 0 {
            e = e.with_place("10 km NE of Lone Pine, CA");
        }
        events.push(e);
    }

    let gateway = Arc::new(MemoryGateway::new());
    let engine = ClusterEngine::new(EngineConfig {
        cluster_min_quakes: 10,
        defined_cluster_min_magnitude: 4.5,
        ..EngineConfig::default()
    })
    .with_gateway(gateway.clone());

    let request = ClusterRequest::from_events(&events, 10.0, 2);
    let response = engine.compute_and_persist(&request).unwrap();

    // The response itself is untouched by persistence
    assert_eq!(response.clusters.len(), 1);
    assert_eq!(response.clusters[0].quake_count, 12);

    // Persistence is fire-and-forget; wait for the background task
    for _ in 0..100 {
        if !gateway.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(gateway.len(), 1);

    let stored = gateway.get("overview_cluster_sig0_12").unwrap();
    assert!(stored.slug.starts_with("12-quakes-near-"));
    assert!(stored.slug.contains("-up-to-m5.2-"));
    assert!(stored.slug.ends_with("-sig0"));
    assert!(stored.updated_at > 0);
    assert!(stored.description.contains("M5.2"));
}

#[tokio::test]
async fn non_significant_clusters_are_never_persisted() {
    let gateway = Arc::new(MemoryGateway::new());
    let engine =
        ClusterEngine::new(EngineConfig::default()).with_gateway(gateway.clone());

    // Triplet with max magnitude 3.4: below both default thresholds
    let request = ClusterRequest::from_events(&near_triplet_and_far(), 10.0, 2);
    let response = engine.compute_and_persist(&request).unwrap();

    assert_eq!(response.clusters.len(), 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(gateway.is_empty());
}

#[tokio::test]
async fn repeated_computation_upserts_the_same_stable_key() {
    let mut events = Vec::new();
    for i in 0..12i64 {
        let mag = if i == 0 { 5.0 } else { 2.0 };
        events.push(event(
            &format!("r{i}"),
            i * 1_000,
            mag,
            10.0 + i as f64 * 0.001,
            20.0,
        ));
    }

    let gateway = Arc::new(MemoryGateway::new());
    let engine = ClusterEngine::new(EngineConfig {
        cluster_min_quakes: 10,
        defined_cluster_min_magnitude: 4.5,
        ..EngineConfig::default()
    })
    .with_gateway(gateway.clone());

    let request = ClusterRequest::from_events(&events, 10.0, 2);
    engine.compute_and_persist(&request).unwrap();
    engine.compute_and_persist(&request).unwrap();

    for _ in 0..100 {
        if gateway.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    // Same cluster, same strongest member, same size: one row, overwritten
    assert_eq!(gateway.len(), 1);
    assert!(gateway.get("overview_cluster_r0_12").is_some());
}

// ============================================================================
// Structural Invariants
// ============================================================================

#[test]
fn clusters_are_disjoint_and_meet_min_quakes() {
    let events = scattered(200, 11);
    let engine = ClusterEngine::new(EngineConfig::default());
    let request = ClusterRequest::from_events(&events, 40.0, 3);

    let response = engine.compute(&request).unwrap();

    let mut seen = HashSet::new();
    for cluster in &response.clusters {
        assert!(cluster.quake_count >= 3);
        assert_eq!(cluster.quake_count, cluster.earthquake_ids.len());
        for id in &cluster.earthquake_ids {
            assert!(seen.insert(id.clone()), "event {id} in two clusters");
        }
    }
}

#[test]
fn every_cluster_is_chain_connected() {
    let events = scattered(120, 23);
    let max_distance_km = 60.0;
    let engine = ClusterEngine::new(EngineConfig::default());
    let request = ClusterRequest::from_events(&events, max_distance_km, 2);

    let response = engine.compute(&request).unwrap();
    assert!(!response.clusters.is_empty());

    for cluster in &response.clusters {
        let members: Vec<&EarthquakeEvent> = cluster
            .earthquake_ids
            .iter()
            .map(|id| events.iter().find(|e| &e.id == id).unwrap())
            .collect();

        // BFS over threshold edges must reach every member from the first
        let mut reached = vec![false; members.len()];
        let mut queue = vec![0usize];
        reached[0] = true;
        while let Some(i) = queue.pop() {
            for j in 0..members.len() {
                if !reached[j]
                    && geo::haversine_km(
                        members[i].latitude,
                        members[i].longitude,
                        members[j].latitude,
                        members[j].longitude,
                    ) <= max_distance_km
                {
                    reached[j] = true;
                    queue.push(j);
                }
            }
        }
        assert!(reached.iter().all(|&r| r), "cluster is not chain-connected");
    }
}

#[test]
fn radius_bounds_every_member_and_is_attained() {
    let events = scattered(100, 31);
    let engine = ClusterEngine::new(EngineConfig::default());
    let request = ClusterRequest::from_events(&events, 80.0, 2);

    let response = engine.compute(&request).unwrap();
    assert!(!response.clusters.is_empty());

    for cluster in &response.clusters {
        let mut max_seen: f64 = 0.0;
        for id in &cluster.earthquake_ids {
            let e = events.iter().find(|e| &e.id == id).unwrap();
            let d = geo::haversine_km(
                cluster.centroid_lat,
                cluster.centroid_lon,
                e.latitude,
                e.longitude,
            );
            assert!(d <= cluster.radius_km + 1e-9);
            max_seen = max_seen.max(d);
        }
        assert!((max_seen - cluster.radius_km).abs() < 1e-9);
    }
}

#[test]
fn recomputation_is_idempotent() {
    let events = scattered(150, 41);
    let engine = ClusterEngine::new(EngineConfig::default());
    let request = ClusterRequest::from_events(&events, 50.0, 2);

    let first = engine.compute(&request).unwrap();
    let second = engine.compute(&request).unwrap();

    assert_eq!(first.clusters, second.clusters);
}
