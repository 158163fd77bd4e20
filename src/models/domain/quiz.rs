use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_question::QuestionRecord;

/// A quiz produced by one upload, owned by the session that uploaded it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedQuiz {
    pub id: Uuid,
    pub session_id: Uuid,
    pub questions: Vec<QuestionRecord>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedQuiz {
    pub fn new(session_id: Uuid, questions: Vec<QuestionRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            questions,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, session_id: &Uuid) -> bool {
        self.session_id == *session_id
    }
}
