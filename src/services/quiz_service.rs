use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::{
    constants::catalog,
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            quiz_file::QuizFile,
            request::{CreateQuizRequest, QuestionInput},
        },
    },
    repositories::QuizRepository,
};

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE is a valid regex pattern"));

/// A quiz rendered as a downloadable file.
#[derive(Debug, Clone)]
pub struct QuizExport {
    pub file_name: String,
    pub contents: String,
}

pub fn export_file_name(title: &str) -> String {
    format!("{}_quiz.json", WHITESPACE.replace_all(title.trim(), "_"))
}

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        let mut quizzes = catalog::builtin_quizzes().to_vec();
        quizzes.extend(self.repository.find_all().await?);
        Ok(quizzes)
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        if let Some(quiz) = self.repository.find_by_id(id).await? {
            return Ok(quiz);
        }

        catalog::find_builtin(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let questions = request
            .questions
            .into_iter()
            .map(QuestionInput::into_question)
            .collect();
        let quiz = Quiz::new(&request.title, questions, request.time_limit);

        log::info!("Creating quiz '{}' ({})", quiz.title, quiz.id);
        self.repository.create(quiz).await
    }

    pub async fn add_question(&self, quiz_id: &str, input: QuestionInput) -> AppResult<Quiz> {
        input.validate()?;

        let mut quiz = self.editable_quiz(quiz_id).await?;
        quiz.questions.push(input.into_question());
        self.repository.update(quiz).await
    }

    /// The replaced question keeps its id.
    pub async fn update_question(
        &self,
        quiz_id: &str,
        index: usize,
        input: QuestionInput,
    ) -> AppResult<Quiz> {
        input.validate()?;

        let mut quiz = self.editable_quiz(quiz_id).await?;
        let slot = quiz
            .questions
            .get_mut(index)
            .ok_or_else(|| missing_question(quiz_id, index))?;

        let id = std::mem::take(&mut slot.id);
        *slot = input.into_question();
        slot.id = id;

        self.repository.update(quiz).await
    }

    pub async fn delete_question(&self, quiz_id: &str, index: usize) -> AppResult<Quiz> {
        let mut quiz = self.editable_quiz(quiz_id).await?;
        if index >= quiz.questions.len() {
            return Err(missing_question(quiz_id, index));
        }

        quiz.questions.remove(index);
        self.repository.update(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        if catalog::is_builtin(id) {
            return Err(builtin_is_read_only(id));
        }

        self.repository.delete(id).await?;
        log::info!("Deleted quiz {}", id);
        Ok(())
    }

    /// Rejected files leave the store untouched.
    pub async fn import_quiz(&self, raw: &str) -> AppResult<Quiz> {
        let file = QuizFile::parse(raw).map_err(|err| {
            log::warn!("Rejected quiz import: {}", err);
            err
        })?;

        let quiz = file.into_quiz();
        log::info!(
            "Importing quiz '{}' with {} questions as {}",
            quiz.title,
            quiz.questions.len(),
            quiz.id
        );
        self.repository.create(quiz).await
    }

    pub async fn export_quiz(&self, id: &str) -> AppResult<QuizExport> {
        let quiz = self.get_quiz(id).await?;
        let contents = serde_json::to_string_pretty(&QuizFile::from(&quiz))?;

        Ok(QuizExport {
            file_name: export_file_name(&quiz.title),
            contents,
        })
    }

    async fn editable_quiz(&self, id: &str) -> AppResult<Quiz> {
        if let Some(quiz) = self.repository.find_by_id(id).await? {
            return Ok(quiz);
        }

        if catalog::is_builtin(id) {
            return Err(builtin_is_read_only(id));
        }

        Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }
}

fn builtin_is_read_only(id: &str) -> AppError {
    AppError::ValidationError(format!("Quiz '{}' is built in and cannot be modified", id))
}

fn missing_question(quiz_id: &str, index: usize) -> AppError {
    AppError::NotFound(format!("Quiz '{}' has no question at index {}", quiz_id, index))
}
