use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::GeneratedQuiz};

/// Generated quizzes, each owned by exactly one session.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<GeneratedQuiz>>;
    async fn find_by_session(&self, session_id: &Uuid) -> AppResult<Option<GeneratedQuiz>>;
    /// Stores `quiz` as its session's current quiz, replacing any earlier one.
    async fn replace_for_session(&self, quiz: GeneratedQuiz) -> AppResult<GeneratedQuiz>;
    /// Drops quizzes created before `cutoff`; returns how many were removed.
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
}

#[derive(Default)]
struct QuizIndex {
    quizzes: HashMap<Uuid, GeneratedQuiz>,
    by_session: HashMap<Uuid, Uuid>,
}

#[derive(Default, Clone)]
pub struct InMemoryQuizRepository {
    index: Arc<RwLock<QuizIndex>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<GeneratedQuiz>> {
        let index = self.index.read().await;
        Ok(index.quizzes.get(id).cloned())
    }

    async fn find_by_session(&self, session_id: &Uuid) -> AppResult<Option<GeneratedQuiz>> {
        let index = self.index.read().await;
        Ok(index
            .by_session
            .get(session_id)
            .and_then(|quiz_id| index.quizzes.get(quiz_id))
            .cloned())
    }

    async fn replace_for_session(&self, quiz: GeneratedQuiz) -> AppResult<GeneratedQuiz> {
        let mut index = self.index.write().await;
        if let Some(previous) = index.by_session.insert(quiz.session_id, quiz.id) {
            index.quizzes.remove(&previous);
        }
        index.quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut index = self.index.write().await;
        let expired: Vec<(Uuid, Uuid)> = index
            .quizzes
            .values()
            .filter(|quiz| quiz.created_at < cutoff)
            .map(|quiz| (quiz.id, quiz.session_id))
            .collect();

        for (quiz_id, session_id) in &expired {
            index.quizzes.remove(quiz_id);
            if index.by_session.get(session_id) == Some(quiz_id) {
                index.by_session.remove(session_id);
            }
        }

        Ok(expired.len())
    }
}
