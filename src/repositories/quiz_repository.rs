use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    db::{Collection, Database},
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct StoreQuizRepository {
    collection: Collection<Quiz>,
}

impl StoreQuizRepository {
    pub fn new(db: &Database, key: &str) -> Self {
        let collection = db.get_collection(key);
        Self { collection }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Quiz with id '{}' not found", id))
}

#[async_trait]
impl QuizRepository for StoreQuizRepository {
    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        Ok(self.collection.read_all().await)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.read_all().await.into_iter().find(|q| q.id == id);
        Ok(quiz)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.collection.read_all().await;
        quizzes.push(quiz.clone());
        self.collection.write_all(&quizzes).await?;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.collection.read_all().await;
        let slot = quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or_else(|| not_found(&quiz.id))?;
        *slot = quiz.clone();
        self.collection.write_all(&quizzes).await?;
        Ok(quiz)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut quizzes = self.collection.read_all().await;
        let before = quizzes.len();
        quizzes.retain(|q| q.id != id);
        if quizzes.len() == before {
            return Err(not_found(id));
        }
        self.collection.write_all(&quizzes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn repository() -> StoreQuizRepository {
        StoreQuizRepository::new(&Database::in_memory(), "quizzes")
    }

    #[actix_rt::test]
    async fn test_create_keeps_insertion_order() {
        let repository = repository();
        let first = repository.create(fixtures::quiz("First", &[0, 1])).await.unwrap();
        let second = repository.create(fixtures::quiz("Second", &[1])).await.unwrap();

        let all = repository.find_all().await.unwrap();
        assert_eq!(
            all.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(),
            vec![first.id.as_str(), second.id.as_str()]
        );
    }

    #[actix_rt::test]
    async fn test_update_replaces_in_place() {
        let repository = repository();
        let mut quiz = repository.create(fixtures::quiz("Before", &[0])).await.unwrap();
        quiz.title = "After".to_string();

        repository.update(quiz.clone()).await.unwrap();

        let found = repository.find_by_id(&quiz.id).await.unwrap().unwrap();
        assert_eq!(found.title, "After");
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_update_and_delete_missing_quiz() {
        let repository = repository();

        let update = repository.update(fixtures::quiz("Ghost", &[0])).await;
        assert!(matches!(update, Err(AppError::NotFound(_))));

        let delete = repository.delete("missing").await;
        assert!(matches!(delete, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_delete_removes_quiz() {
        let repository = repository();
        let quiz = repository.create(fixtures::quiz("Temp", &[0])).await.unwrap();

        repository.delete(&quiz.id).await.unwrap();

        assert!(repository.find_by_id(&quiz.id).await.unwrap().is_none());
    }
}
