//! Shared Cache Handle
//!
//! The single store instance handed to request handlers. All access to the
//! entry collection goes through this handle.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::{CacheStore, StatsSnapshot};
use crate::error::Result;
use crate::persistence::SnapshotFile;

// == Shared Cache ==
/// Thread-safe handle to a [`CacheStore`], optionally backed by a snapshot.
///
/// `put` and `delete` hold the write lock across the admission checks, the
/// mutation and the snapshot write. Lookups and counts take the read lock
/// and run concurrently with each other.
#[derive(Debug, Clone)]
pub struct SharedCache {
    store: Arc<RwLock<CacheStore>>,
    snapshot: Option<Arc<SnapshotFile>>,
}

impl SharedCache {
    /// Wraps an in-memory store with no backing snapshot.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            snapshot: None,
        }
    }

    // == Open ==
    /// Creates a store backed by `snapshot`, loading its current contents.
    ///
    /// Entries the store refuses (over capacity, duplicate or invalid) are
    /// skipped with a warning.
    pub async fn open(max_capacity: usize, snapshot: SnapshotFile) -> Result<Self> {
        let mut store = CacheStore::new(max_capacity);

        for entry in snapshot.load().await? {
            let key = entry.key.clone();
            if let Err(e) = store.put(entry.key, entry.value) {
                warn!("Skipping snapshot entry '{}': {}", key, e);
            }
        }

        info!(
            "Loaded {} entries from snapshot {}",
            store.count(),
            snapshot.path().display()
        );

        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            snapshot: Some(Arc::new(snapshot)),
        })
    }

    // == Put ==
    /// Admits a new entry; see [`CacheStore::put`].
    ///
    /// If the snapshot cannot be written the insert is undone and the call
    /// fails with `Unavailable`.
    pub async fn put(&self, key: String, value: String) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.clone(), value)?;

        if let Some(snapshot) = &self.snapshot {
            if let Err(e) = snapshot.save(&store.entries()).await {
                let _ = store.delete(&key);
                return Err(e);
            }
        }

        Ok(())
    }

    // == Get ==
    pub async fn get(&self, key: &str) -> Result<String> {
        self.store.read().await.get(key)
    }

    // == Delete ==
    /// Removes an entry; see [`CacheStore::delete`].
    ///
    /// If the snapshot cannot be written the entry is restored and the call
    /// fails with `Unavailable`.
    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let removed = store.delete(key)?;

        if let Some(snapshot) = &self.snapshot {
            if let Err(e) = snapshot.save(&store.entries()).await {
                store.restore(removed);
                return Err(e);
            }
        }

        Ok(())
    }

    // == Count ==
    pub async fn count(&self) -> usize {
        self.store.read().await.count()
    }

    pub async fn capacity(&self) -> usize {
        self.store.read().await.capacity()
    }

    // == Stats ==
    pub async fn stats(&self) -> StatsSnapshot {
        self.store.read().await.stats()
    }
}
