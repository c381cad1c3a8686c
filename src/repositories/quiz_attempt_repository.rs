use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    db::{Collection, Database},
    errors::AppResult,
    models::domain::QuizAttempt,
};

/// The whole attempt history lives under one key and is always read and
/// written as a unit.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn read_all(&self) -> AppResult<Vec<QuizAttempt>>;
    async fn write_all(&self, attempts: &[QuizAttempt]) -> AppResult<()>;
}

pub struct StoreQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl StoreQuizAttemptRepository {
    pub fn new(db: &Database, key: &str) -> Self {
        let collection = db.get_collection(key);
        Self { collection }
    }
}

#[async_trait]
impl QuizAttemptRepository for StoreQuizAttemptRepository {
    async fn read_all(&self) -> AppResult<Vec<QuizAttempt>> {
        Ok(self.collection.read_all().await)
    }

    async fn write_all(&self, attempts: &[QuizAttempt]) -> AppResult<()> {
        log::debug!(
            "Writing {} attempts under '{}'",
            attempts.len(),
            self.collection.key()
        );
        self.collection.write_all(attempts).await
    }
}
