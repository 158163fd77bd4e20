use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question parsed from a model reply.
///
/// `options` always holds exactly [`OPTION_COUNT`] entries and `answer` is the
/// upper-cased final character of the reply's answer line. Neither is checked
/// further: an option may be an empty string and the answer is not guaranteed
/// to be one of `A`..`D`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionRecord {
    pub fn new(question: impl Into<String>, options: Vec<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options,
            answer: answer.into(),
        }
    }
}
