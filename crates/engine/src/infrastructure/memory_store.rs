//! In-memory session storage for tests and throwaway deployments.

use async_trait::async_trait;
use frame_survivor_domain::{SessionId, SessionRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{RepoError, SessionRepo};
use crate::infrastructure::session_store::lenient_explore_count;

/// Records are kept as serialized JSON so loads go through the same
/// validation as the SQLite store.
#[derive(Default)]
pub struct InMemorySessionRepo {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepo for InMemorySessionRepo {
    async fn get(&self, id: SessionId) -> Result<Option<SessionRecord>, RepoError> {
        let entries = self.entries.read().await;
        entries
            .get(&id.storage_key())
            .map(|json| serde_json::from_str(json).map_err(RepoError::serialization))
            .transpose()
    }

    async fn set(&self, id: SessionId, record: &SessionRecord) -> Result<(), RepoError> {
        let json = serde_json::to_string(record).map_err(RepoError::serialization)?;
        self.entries.write().await.insert(id.storage_key(), json);
        Ok(())
    }

    async fn explore_count_lenient(&self, id: SessionId) -> Result<u32, RepoError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&id.storage_key())
            .map_or(0, |json| lenient_explore_count(json)))
    }
}
