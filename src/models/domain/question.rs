use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>, // display order
    pub correct_answer: u32,  // index into options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(
        text: &str,
        options: Vec<String>,
        correct_answer: u32,
        explanation: Option<String>,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            options: options.into_iter().map(|o| o.trim().to_string()).collect(),
            correct_answer,
            explanation: explanation
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn is_correct(&self, selected_answer: u32) -> bool {
        selected_answer == self.correct_answer
    }

    pub fn has_option(&self, index: u32) -> bool {
        (index as usize) < self.options.len()
    }

    pub fn check(&self) -> Result<(), String> {
        check_question_shape(&self.text, &self.options, self.correct_answer)
    }
}

/// Shape rules shared by authoring, import and generation.
pub fn check_question_shape(
    text: &str,
    options: &[String],
    correct_answer: u32,
) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("question text is required".to_string());
    }

    if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
        return Err(format!(
            "a question needs between {} and {} options, got {}",
            MIN_OPTIONS,
            MAX_OPTIONS,
            options.len()
        ));
    }

    if options.iter().any(|o| o.trim().is_empty()) {
        return Err("all options must have content".to_string());
    }

    if correct_answer as usize >= options.len() {
        return Err(format!(
            "correctAnswer {} is out of range for {} options",
            correct_answer,
            options.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {}", i)).collect()
    }

    #[test]
    fn new_trims_and_assigns_id() {
        let question = Question::new(
            "  What is 2 + 2?  ",
            vec![" 3 ".to_string(), "4".to_string()],
            1,
            Some("   ".to_string()),
        );

        assert!(!question.id.is_empty());
        assert_eq!(question.text, "What is 2 + 2?");
        assert_eq!(question.options, vec!["3", "4"]);
        assert_eq!(question.explanation, None);
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn check_accepts_two_to_six_options() {
        assert!(check_question_shape("q", &options(2), 0).is_ok());
        assert!(check_question_shape("q", &options(6), 5).is_ok());
        assert!(check_question_shape("q", &options(1), 0).is_err());
        assert!(check_question_shape("q", &options(7), 0).is_err());
    }

    #[test]
    fn check_rejects_out_of_range_answer_and_blank_fields() {
        let err = check_question_shape("q", &options(4), 4).unwrap_err();
        assert!(err.contains("out of range"));

        assert!(check_question_shape("   ", &options(4), 0).is_err());

        let mut blank = options(3);
        blank[1] = " ".to_string();
        assert!(check_question_shape("q", &blank, 0).is_err());
    }

    #[test]
    fn question_deserializes_from_camel_case_without_explanation() {
        let json = r#"{"id":"1","text":"Pick","options":["a","b"],"correctAnswer":1}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.correct_answer, 1);
        assert_eq!(question.explanation, None);
        assert!(question.has_option(1));
        assert!(!question.has_option(2));
    }
}
