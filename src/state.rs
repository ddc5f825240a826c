use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::config::{HubConfig, ReadMode};
use crate::merge;
use crate::record::HotlistRecord;
use crate::store::HotlistStore;
use crate::upstream::HotlistClient;

/// Shared application state, passed to route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: HubConfig,
    pub store: HotlistStore,
    pub client: HotlistClient,

    /// The accumulated collection, newest first in cache mode. Swapped
    /// wholesale at the end of each successful ingestion cycle; readers
    /// clone the `Arc` and then work on an immutable snapshot, so they
    /// never block on cycle I/O and never see a partial merge.
    records: RwLock<Arc<Vec<HotlistRecord>>>,
}

impl AppState {
    pub fn new(config: HubConfig) -> Result<Arc<Self>> {
        let client = HotlistClient::new(&config)?;
        let store = HotlistStore::new(config.data_file.clone());

        let mut seed = store.load();
        if config.read_mode == ReadMode::Cache {
            merge::sort_newest_first(&mut seed);
        }
        tracing::info!(
            records = seed.len(),
            path = %store.path().display(),
            "loaded stored hotlist"
        );

        Ok(Arc::new(Self {
            config,
            store,
            client,
            records: RwLock::new(Arc::new(seed)),
        }))
    }

    /// Current collection snapshot.
    pub async fn snapshot(&self) -> Arc<Vec<HotlistRecord>> {
        Arc::clone(&*self.records.read().await)
    }

    /// Atomically publish a new collection.
    pub async fn install(&self, records: Arc<Vec<HotlistRecord>>) {
        *self.records.write().await = records;
    }
}
