use std::borrow::Cow;

use async_graphql::InputObject;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::question::{check_question_shape, Question};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }
    Ok(())
}

fn question_shape(input: &QuestionInput) -> Result<(), ValidationError> {
    check_question_shape(&input.text, &input.options, input.correct_answer)
        .map_err(|reason| ValidationError::new("question_shape").with_message(Cow::from(reason)))
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "question_shape"))]
pub struct QuestionInput {
    #[serde(default)]
    pub id: Option<String>, // ignored, ids are always assigned server-side
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuestionInput {
    pub fn into_question(self) -> Question {
        Question::new(
            &self.text,
            self.options,
            self.correct_answer,
            self.explanation,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(nested)]
    #[graphql(default)]
    pub questions: Vec<QuestionInput>,

    #[validate(range(min = 1))]
    pub time_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: String,
    pub selected_answer: u32,
    /// Seconds, at most one day.
    #[serde(default)]
    #[validate(range(max = 86_400))]
    pub time_spent: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub text: String,

    #[validate(range(min = 1, max = 20))]
    pub questions_per_chunk: Option<u32>,

    #[validate(range(min = 100))]
    pub chunk_size: Option<u32>,

    pub overlap: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUploadQuery {
    #[validate(custom(function = "not_blank"))]
    pub file_name: String,

    #[serde(default)]
    pub title: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub questions_per_chunk: Option<u32>,

    #[validate(range(min = 100))]
    pub chunk_size: Option<u32>,

    pub overlap: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AttemptsQuery {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}
