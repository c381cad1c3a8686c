use serde::Serialize;

use crate::models::domain::{
    QuizAttempt, QuizSession, SessionState, SubmitOutcome, UserAnswer,
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A question as seen during a session. Answer key fields stay empty until
/// the question has been answered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    pub quiz_id: String,
    pub title: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    pub total_questions: usize,
    pub answered_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub questions: Vec<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<QuizAttempt>,
}

impl From<&QuizSession> for SessionView {
    fn from(session: &QuizSession) -> Self {
        let quiz = session.quiz();
        let questions = quiz
            .questions
            .iter()
            .map(|q| match session.answer_for(&q.id) {
                Some(answer) => QuestionView {
                    id: q.id.clone(),
                    text: q.text.clone(),
                    options: q.options.clone(),
                    answered: true,
                    selected_answer: Some(answer.selected_answer),
                    is_correct: Some(answer.is_correct),
                    correct_answer: Some(q.correct_answer),
                    explanation: q.explanation.clone(),
                },
                None => QuestionView {
                    id: q.id.clone(),
                    text: q.text.clone(),
                    options: q.options.clone(),
                    answered: false,
                    selected_answer: None,
                    is_correct: None,
                    correct_answer: None,
                    explanation: None,
                },
            })
            .collect();

        SessionView {
            session_id: session.id().to_string(),
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            status: status_of(session.state()),
            current_index: session.current_index(),
            total_questions: session.total_questions(),
            answered_count: session.answers().len(),
            time_limit: quiz.time_limit,
            questions,
            attempt: session.attempt().cloned(),
        }
    }
}

fn status_of(state: &SessionState) -> &'static str {
    match state {
        SessionState::InProgress { .. } => "inProgress",
        SessionState::AwaitingSubmitConfirmation { .. } => "awaitingSubmitConfirmation",
        SessionState::Complete { .. } => "complete",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    pub session_id: String,
    pub answer: UserAnswer,
    pub correct_answer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub session_id: String,
    pub current_index: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SubmitResponse {
    Complete { attempt: QuizAttempt },
    AwaitingSubmitConfirmation { answered: usize, total: usize },
}

impl From<SubmitOutcome> for SubmitResponse {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Completed(attempt) => SubmitResponse::Complete { attempt },
            SubmitOutcome::NeedsConfirmation { answered, total } => {
                SubmitResponse::AwaitingSubmitConfirmation { answered, total }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Question, Quiz};

    fn session() -> QuizSession {
        let questions = vec![
            Question::new("One", vec!["a".into(), "b".into()], 1, Some("b wins".into())),
            Question::new("Two", vec!["a".into(), "b".into()], 0, Some("a wins".into())),
        ];
        QuizSession::start(Quiz::new("View quiz", questions, Some(90))).unwrap()
    }

    #[test]
    fn test_session_view_hides_answer_key_until_answered() {
        let mut session = session();
        let first = session.quiz().questions[0].id.clone();
        session.answer(&first, 0, Some(3)).unwrap();

        let view = SessionView::from(&session);

        assert_eq!(view.status, "inProgress");
        assert_eq!(view.answered_count, 1);
        assert_eq!(view.questions[0].correct_answer, Some(1));
        assert_eq!(view.questions[0].is_correct, Some(false));
        assert_eq!(view.questions[1].correct_answer, None);
        assert_eq!(view.questions[1].explanation, None);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["questions"][1].get("correctAnswer").is_none());
        assert_eq!(json["timeLimit"], 90);
    }

    #[test]
    fn test_replaced_answer_updates_revealed_view() {
        let mut session = session();
        let first = session.quiz().questions[0].id.clone();
        session.answer(&first, 0, Some(3)).unwrap();
        session.answer(&first, 1, Some(4)).unwrap();

        let view = SessionView::from(&session);

        assert_eq!(view.answered_count, 1);
        assert_eq!(view.questions[0].selected_answer, Some(1));
        assert_eq!(view.questions[0].is_correct, Some(true));
        assert_eq!(view.questions[0].explanation.as_deref(), Some("b wins"));
        assert_eq!(view.questions[1].selected_answer, None);
        assert_eq!(view.questions[1].correct_answer, None);
    }

    #[test]
    fn test_submit_response_shapes() {
        let pending = SubmitResponse::from(SubmitOutcome::NeedsConfirmation {
            answered: 1,
            total: 2,
        });
        let json = serde_json::to_value(&pending).unwrap();

        assert_eq!(json["status"], "awaitingSubmitConfirmation");
        assert_eq!(json["answered"], 1);
    }
}
