use std::collections::BTreeMap;

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Dashboard figures derived from the attempt history. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: u32,
    pub average_score: u32,
    pub total_questions_answered: u32,
    pub total_time_spent: u32,
    pub quizzes_by_topic: BTreeMap<String, u32>,
    pub accuracy_by_topic: BTreeMap<String, u32>,
    pub recent_scores: Vec<u32>, // oldest first
}
