pub mod quiz;
pub mod quiz_question;
pub mod quiz_result;
pub use quiz::GeneratedQuiz;
pub use quiz_question::QuestionRecord;
pub use quiz_result::QuizResult;
