use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{GeneratedQuiz, QuestionRecord};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizDto {
    pub id: Uuid,
    pub question_count: usize,
    pub questions: Vec<QuestionRecord>,
    pub created_at: DateTime<Utc>,
}

impl From<GeneratedQuiz> for QuizDto {
    fn from(quiz: GeneratedQuiz) -> Self {
        QuizDto {
            id: quiz.id,
            question_count: quiz.questions.len(),
            questions: quiz.questions,
            created_at: quiz.created_at,
        }
    }
}
