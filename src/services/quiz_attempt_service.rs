use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizAttempt,
    repositories::QuizAttemptRepository,
};

pub struct QuizAttemptService {
    repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(repository: Arc<dyn QuizAttemptRepository>) -> Self {
        Self { repository }
    }

    /// Appends a finished attempt to the stored history.
    ///
    /// This is a plain read-modify-write of the whole list, so two callers
    /// finishing at the same moment can lose one of the attempts.
    pub async fn record(&self, mut attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        attempt.score = attempt.score.min(100);

        let mut attempts = self.repository.read_all().await?;
        attempts.push(attempt.clone());
        self.repository.write_all(&attempts).await?;

        log::info!(
            "Recorded attempt {} for '{}': {}% ({}/{})",
            attempt.id,
            attempt.title,
            attempt.score,
            attempt.correct_answers,
            attempt.total_questions
        );
        Ok(attempt)
    }

    pub async fn list_attempts(&self) -> AppResult<Vec<QuizAttempt>> {
        self.repository.read_all().await
    }

    /// The last `limit` attempts in storage order.
    pub async fn recent_attempts(&self, limit: usize) -> AppResult<Vec<QuizAttempt>> {
        let mut attempts = self.repository.read_all().await?;
        let skip = attempts.len().saturating_sub(limit);
        Ok(attempts.split_off(skip))
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<QuizAttempt> {
        self.repository
            .read_all()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))
    }
}
