use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{quiz::Quiz, scoring::percentage};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub title: String, // quiz title at attempt time
    pub date: DateTime<Utc>,
    pub score: u32, // integer percentage, 0..=100
    pub time_spent: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub answers: Vec<UserAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: String,
    pub selected_answer: u32,
    pub is_correct: bool,
    pub time_spent: u32, // seconds on that question
}

impl QuizAttempt {
    /// Unanswered questions count against the score but have no entry in
    /// `answers`.
    pub fn grade(quiz: &Quiz, answers: Vec<UserAnswer>, date: DateTime<Utc>) -> Self {
        let total_questions = quiz.question_count() as u32;
        let correct_answers = answers.iter().filter(|a| a.is_correct).count() as u32;
        let time_spent = answers
            .iter()
            .fold(0u32, |total, a| total.saturating_add(a.time_spent));

        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            date,
            score: percentage(correct_answers, total_questions),
            time_spent,
            correct_answers,
            total_questions,
            answers,
        }
    }
}
