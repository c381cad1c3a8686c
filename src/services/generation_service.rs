use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{question::check_question_shape, Question, Quiz},
    repositories::QuizRepository,
    services::question_generator::{
        GeneratedItem, GenerationParams, GenerationSource, QuestionGenerator,
    },
};

pub const DEFAULT_GENERATED_TITLE: &str = "Generated Quiz";

/// Turns one generated item into a question, or explains why it can't.
pub fn item_to_question(item: GeneratedItem) -> Result<Question, String> {
    let correct_answer = match (item.correct_index, item.answer.as_deref()) {
        (Some(index), _) => {
            u32::try_from(index).map_err(|_| format!("negative correct_index {}", index))?
        }
        (None, Some(answer)) => item
            .options
            .iter()
            .position(|o| o.trim() == answer.trim())
            .map(|p| p as u32)
            .ok_or_else(|| format!("answer '{}' is not one of the options", answer))?,
        (None, None) => return Err("no correct option given".to_string()),
    };

    check_question_shape(&item.question, &item.options, correct_answer)?;
    Ok(Question::new(
        &item.question,
        item.options,
        correct_answer,
        item.explanation,
    ))
}

pub struct GenerationService {
    generator: Arc<dyn QuestionGenerator>,
    repository: Arc<dyn QuizRepository>,
    defaults: GenerationParams,
}

impl GenerationService {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        repository: Arc<dyn QuizRepository>,
        defaults: GenerationParams,
    ) -> Self {
        Self {
            generator,
            repository,
            defaults,
        }
    }

    pub fn defaults(&self) -> GenerationParams {
        self.defaults
    }

    /// Generates and stores a quiz. Nothing is stored unless at least one
    /// usable question came back.
    pub async fn generate_quiz(
        &self,
        title: &str,
        source: GenerationSource,
        params: GenerationParams,
    ) -> AppResult<Quiz> {
        let items = self.generator.generate(source, params).await?;
        let received = items.len();

        let questions: Vec<Question> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match item_to_question(item) {
                Ok(question) => Some(question),
                Err(reason) => {
                    log::warn!("Skipping generated item {}: {}", i, reason);
                    None
                }
            })
            .collect();

        if questions.is_empty() {
            return Err(AppError::GenerationError(format!(
                "no usable questions were generated ({} items received)",
                received
            )));
        }

        let title = match title.trim() {
            "" => DEFAULT_GENERATED_TITLE,
            t => t,
        };
        let quiz = Quiz::new(title, questions, None);
        log::info!(
            "Generated quiz '{}' with {} of {} items",
            quiz.title,
            quiz.questions.len(),
            received
        );

        self.repository.create(quiz).await
    }

    pub async fn generator_health(&self) -> AppResult<()> {
        self.generator.health().await
    }
}
