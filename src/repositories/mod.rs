pub mod quiz_attempt_repository;
pub mod quiz_repository;

pub use quiz_attempt_repository::{QuizAttemptRepository, StoreQuizAttemptRepository};
pub use quiz_repository::{QuizRepository, StoreQuizRepository};

#[cfg(test)]
pub use quiz_attempt_repository::MockQuizAttemptRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
