use std::sync::Arc;

use actix_web::web;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    documents::{extract_text, UploadedDocument},
    errors::{AppError, AppResult},
    models::domain::GeneratedQuiz,
    repositories::QuizRepository,
    services::{model_service::{request_quiz, CompletionClient}, quiz_parser::parse_questions},
};

/// Runs the upload pipeline: extract, request, parse, store.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    completion_client: Option<Arc<dyn CompletionClient>>,
    session_ttl: Duration,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        completion_client: Option<Arc<dyn CompletionClient>>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            completion_client,
            session_ttl,
        }
    }

    pub async fn generate_quiz(
        &self,
        session_id: Uuid,
        document: UploadedDocument,
    ) -> AppResult<GeneratedQuiz> {
        let kind = document
            .kind()
            .ok_or_else(|| AppError::UnsupportedFileType(document.filename.clone()))?;

        log::info!(
            "Generating quiz from {} ({:?}, {} bytes)",
            document.filename,
            kind,
            document.bytes.len()
        );

        let bytes = document.bytes;
        let text = web::block(move || extract_text(&bytes, kind))
            .await
            .map_err(|e| AppError::InternalError(format!("Extraction task failed: {}", e)))??;

        let client = self
            .completion_client
            .as_ref()
            .ok_or(AppError::MissingApiKey)?;

        let reply = request_quiz(client.as_ref(), &text).await?;
        let questions = parse_questions(&reply);

        self.purge_expired().await;
        let quiz = self
            .repository
            .replace_for_session(GeneratedQuiz::new(session_id, questions))
            .await?;

        log::info!(
            "Stored quiz {} with {} questions",
            quiz.id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// The quiz with `id`, visible only to the session that generated it.
    pub async fn get_quiz(&self, session_id: &Uuid, id: &Uuid) -> AppResult<GeneratedQuiz> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|quiz| quiz.is_owned_by(session_id))
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn current_quiz(&self, session_id: &Uuid) -> AppResult<GeneratedQuiz> {
        self.repository
            .find_by_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No quiz has been generated yet".to_string()))
    }

    async fn purge_expired(&self) {
        let cutoff = Utc::now() - self.session_ttl;
        match self.repository.purge_created_before(cutoff).await {
            Ok(0) => {}
            Ok(removed) => log::info!("Purged {} expired quizzes", removed),
            Err(e) => log::warn!("Failed to purge expired quizzes: {}", e),
        }
    }
}
