use async_trait::async_trait;
use contracts::domain::a001_tab_set::{TabSet, TabSetId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::error::TabSetError;

/// Key-value contract the tab set store is built on.
///
/// `save` replaces the whole record or leaves the previous one untouched.
#[async_trait]
pub trait TabSetStorage: Send + Sync {
    async fn load(&self, id: &TabSetId) -> Result<Option<TabSet>, TabSetError>;

    async fn save(&self, set: &TabSet) -> Result<(), TabSetError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, id: &TabSetId) -> Result<bool, TabSetError>;

    async fn list(&self) -> Result<Vec<TabSet>, TabSetError>;
}

/// In-process storage, used by tests and as a scratch backend.
#[derive(Default)]
pub struct MemoryTabSetStorage {
    sets: RwLock<BTreeMap<TabSetId, TabSet>>,
}

impl MemoryTabSetStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TabSetStorage for MemoryTabSetStorage {
    async fn load(&self, id: &TabSetId) -> Result<Option<TabSet>, TabSetError> {
        Ok(self.sets.read().await.get(id).cloned())
    }

    async fn save(&self, set: &TabSet) -> Result<(), TabSetError> {
        self.sets.write().await.insert(set.id.clone(), set.clone());
        Ok(())
    }

    async fn delete(&self, id: &TabSetId) -> Result<bool, TabSetError> {
        Ok(self.sets.write().await.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<TabSet>, TabSetError> {
        Ok(self.sets.read().await.values().cloned().collect())
    }
}
