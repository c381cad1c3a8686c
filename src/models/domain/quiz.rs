use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>, // insertion order is display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>, // seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(title: &str, questions: Vec<Question>, time_limit: Option<u32>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            questions,
            time_limit,
            created_at: Some(Utc::now()),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
