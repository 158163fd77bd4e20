pub mod quiz_repository;
pub mod result_repository;

pub use quiz_repository::{InMemoryQuizRepository, QuizRepository};
pub use result_repository::{InMemoryResultRepository, ResultRepository};
