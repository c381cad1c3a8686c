use schemars::{schema_for, JsonSchema, Schema};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question::{check_question_shape, Question},
        Quiz,
    },
};

/// On-disk shape of an exported quiz. Every id in the file is replaced on
/// import.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(title = "Quiz file")]
pub struct QuizFile {
    pub id: String,
    pub title: String,
    pub questions: Vec<QuizFileQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizFileQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizFile {
    /// Parses and validates a whole file. Nothing is partially accepted.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let file: QuizFile = serde_json::from_str(raw)
            .map_err(|err| AppError::InvalidFormat(format!("not a quiz file: {}", err)))?;
        file.check()?;
        Ok(file)
    }

    pub fn check(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::InvalidFormat("id is required".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::InvalidFormat("title is required".to_string()));
        }

        for (index, question) in self.questions.iter().enumerate() {
            check_question_shape(&question.text, &question.options, question.correct_answer)
                .map_err(|reason| {
                    AppError::InvalidFormat(format!("questions[{}]: {}", index, reason))
                })?;
        }

        Ok(())
    }

    pub fn into_quiz(self) -> Quiz {
        let questions = self
            .questions
            .into_iter()
            .map(|q| Question::new(&q.text, q.options, q.correct_answer, q.explanation))
            .collect();
        Quiz::new(&self.title, questions, self.time_limit)
    }

    pub fn schema() -> Schema {
        schema_for!(QuizFile)
    }
}

impl From<&Quiz> for QuizFile {
    fn from(quiz: &Quiz) -> Self {
        QuizFile {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            time_limit: quiz.time_limit,
            questions: quiz
                .questions
                .iter()
                .map(|q| QuizFileQuestion {
                    id: Some(q.id.clone()),
                    text: q.text.clone(),
                    options: q.options.clone(),
                    correct_answer: q.correct_answer,
                    explanation: q.explanation.clone(),
                })
                .collect(),
        }
    }
}
