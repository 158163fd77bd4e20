use serde::{Deserialize, Serialize};

/// Score summary computed by the browser after a quiz run.
///
/// The server never validates a submitted result; this type only describes the
/// zero-valued default returned before anything was submitted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub total_score: i64,
    pub correct_answers: i64,
    pub time_taken: String,
}

impl Default for QuizResult {
    fn default() -> Self {
        Self {
            total_score: 0,
            correct_answers: 0,
            time_taken: "0s".to_string(),
        }
    }
}
