//! Persistence gateway for significant cluster definitions
//!
//! The engine depends on a single operation: `upsert(stable_key, record)`,
//! idempotent and last-write-wins. Upserts are scheduled as fire-and-forget
//! background tasks after the synchronous response is ready; the engine
//! never awaits them and a failure is logged by this layer, invisible to the
//! engine's caller. Concurrent upserts for the same cluster converge on the
//! deterministic stable key without locking.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::error::PersistenceError;
use crate::metrics::PERSISTENCE_FAILURES_TOTAL;
use crate::types::ClusterDefinition;

/// Durable upsert-by-key store for cluster definitions
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Insert or overwrite the definition stored under `stable_key`
    ///
    /// Implementations must be idempotent and last-write-wins, and must
    /// refresh the record's `updated_at` on every write even when the
    /// cluster content is unchanged.
    async fn upsert(
        &self,
        stable_key: &str,
        definition: ClusterDefinition,
    ) -> Result<(), PersistenceError>;
}

/// In-memory gateway backed by a concurrent map
///
/// Used for embedding and tests; a deployment substitutes its own durable
/// implementation of [`PersistenceGateway`].
#[derive(Debug, Default)]
pub struct MemoryGateway {
    store: DashMap<String, ClusterDefinition>,
}

impl MemoryGateway {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored definitions
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Fetch a stored definition by stable key
    pub fn get(&self, stable_key: &str) -> Option<ClusterDefinition> {
        self.store.get(stable_key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    async fn upsert(
        &self,
        stable_key: &str,
        mut definition: ClusterDefinition,
    ) -> Result<(), PersistenceError> {
        definition.updated_at = Utc::now().timestamp_millis();
        self.store.insert(stable_key.to_string(), definition);
        Ok(())
    }
}

/// Schedule fire-and-forget upserts for a batch of definitions
///
/// Spawns one task per definition on the ambient Tokio runtime and returns
/// immediately. Outside a runtime the batch is skipped with a debug log;
/// the synchronous computation result is unaffected either way.
pub fn schedule_upserts(gateway: Arc<dyn PersistenceGateway>, definitions: Vec<ClusterDefinition>) {
    if definitions.is_empty() {
        return;
    }

    let handle = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            tracing::debug!(
                definitions = definitions.len(),
                "No async runtime available, skipping cluster definition upserts"
            );
            return;
        }
    };

    for definition in definitions {
        let gateway = Arc::clone(&gateway);
        handle.spawn(async move {
            let key = definition.stable_key.clone();
            if let Err(e) = gateway.upsert(&key, definition).await {
                PERSISTENCE_FAILURES_TOTAL.inc();
                tracing::error!(error = %e, key = %key, "Cluster definition upsert failed");
            }
        });
    }
}
