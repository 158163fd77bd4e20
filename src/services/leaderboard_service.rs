use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizResult,
    repositories::ResultRepository,
};

/// Echo store for the browser-computed quiz result of each session.
pub struct LeaderboardService {
    repository: Arc<dyn ResultRepository>,
    session_ttl: Duration,
}

impl LeaderboardService {
    pub fn new(repository: Arc<dyn ResultRepository>, session_ttl: Duration) -> Self {
        Self {
            repository,
            session_ttl,
        }
    }

    /// Stores `result` unvalidated, replacing the session's previous result.
    pub async fn save_result(&self, session_id: Uuid, result: serde_json::Value) -> AppResult<()> {
        let cutoff = Utc::now() - self.session_ttl;
        match self.repository.purge_updated_before(cutoff).await {
            Ok(0) => {}
            Ok(removed) => log::info!("Purged {} expired quiz results", removed),
            Err(e) => log::warn!("Failed to purge expired quiz results: {}", e),
        }

        self.repository.put(session_id, result).await
    }

    /// The stored result, or the zero-valued default when none was saved.
    pub async fn get_result(&self, session_id: &Uuid) -> AppResult<serde_json::Value> {
        match self.repository.get(session_id).await? {
            Some(result) => Ok(result),
            None => serde_json::to_value(QuizResult::default())
                .map_err(|e| AppError::InternalError(e.to_string())),
        }
    }

    /// Accepted for front-end compatibility; nothing is persisted.
    pub fn update_leaderboard(&self, entry: &serde_json::Value) {
        log::debug!("Ignoring leaderboard update: {}", entry);
    }
}
