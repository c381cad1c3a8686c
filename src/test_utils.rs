use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::domain::{Question, Quiz, QuizAttempt, UserAnswer};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A quiz with one three-option question per entry of `correct`.
    pub fn quiz(title: &str, correct: &[u32]) -> Quiz {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    &format!("{} question {}", title, i + 1),
                    vec!["first".into(), "second".into(), "third".into()],
                    c,
                    Some(format!("Option {} is right", c)),
                )
            })
            .collect();
        Quiz::new(title, questions, None)
    }

    pub fn base_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    /// An attempt `minutes` after [`base_date`] with the given tally.
    pub fn attempt(
        title: &str,
        correct_answers: u32,
        total_questions: u32,
        minutes: i64,
    ) -> QuizAttempt {
        let answers = (0..total_questions)
            .map(|i| UserAnswer {
                question_id: format!("q{}", i),
                selected_answer: 0,
                is_correct: i < correct_answers,
                time_spent: 10,
            })
            .collect();

        QuizAttempt {
            id: format!("{}-{}", title, minutes),
            quiz_id: format!("quiz-{}", title),
            title: title.to_string(),
            date: base_date() + Duration::minutes(minutes),
            score: crate::models::domain::scoring::percentage(correct_answers, total_questions),
            time_spent: 10 * total_questions,
            correct_answers,
            total_questions,
            answers,
        }
    }

    pub fn attempts() -> Vec<QuizAttempt> {
        vec![
            attempt("Algebra", 3, 5, 0),
            attempt("Algebra", 4, 5, 10),
            attempt("Chemistry", 1, 4, 5),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz() {
        let quiz = quiz("Sample", &[0, 2]);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[1].correct_answer, 2);
    }

    #[test]
    fn test_fixtures_attempt() {
        let attempt = attempt("Sample", 2, 3, 1);
        assert_eq!(attempt.score, 67);
        assert_eq!(attempt.answers.iter().filter(|a| a.is_correct).count(), 2);
    }
}
