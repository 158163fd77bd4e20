use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppResult;

/// Last quiz result submitted by each session, stored exactly as sent.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn get(&self, session_id: &Uuid) -> AppResult<Option<serde_json::Value>>;
    async fn put(&self, session_id: Uuid, result: serde_json::Value) -> AppResult<()>;
    /// Drops results last written before `cutoff`; returns how many were removed.
    async fn purge_updated_before(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
}

#[derive(Clone)]
struct StoredResult {
    value: serde_json::Value,
    updated_at: DateTime<Utc>,
}

#[derive(Default, Clone)]
pub struct InMemoryResultRepository {
    results: Arc<RwLock<HashMap<Uuid, StoredResult>>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn get(&self, session_id: &Uuid) -> AppResult<Option<serde_json::Value>> {
        let results = self.results.read().await;
        Ok(results.get(session_id).map(|stored| stored.value.clone()))
    }

    async fn put(&self, session_id: Uuid, result: serde_json::Value) -> AppResult<()> {
        let mut results = self.results.write().await;
        results.insert(
            session_id,
            StoredResult {
                value: result,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn purge_updated_before(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|_, stored| stored.updated_at >= cutoff);
        Ok(before - results.len())
    }
}
