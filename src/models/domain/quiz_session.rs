use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question::Question,
        quiz::Quiz,
        quiz_attempt::{QuizAttempt, UserAnswer},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SessionState {
    InProgress {
        current_index: usize,
        answers: Vec<UserAnswer>,
    },
    AwaitingSubmitConfirmation {
        current_index: usize,
        answers: Vec<UserAnswer>,
    },
    Complete {
        attempt: QuizAttempt,
    },
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::InProgress { .. } => "in progress",
            SessionState::AwaitingSubmitConfirmation { .. } => "awaiting submit confirmation",
            SessionState::Complete { .. } => "complete",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(QuizAttempt),
    NeedsConfirmation { answered: usize, total: usize },
}

/// A single run through a quiz snapshot.
#[derive(Clone, Debug)]
pub struct QuizSession {
    id: String,
    quiz: Quiz,
    state: SessionState,
    question_shown_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl QuizSession {
    /// Fails with `NotFound` for a quiz with no questions.
    pub fn start(quiz: Quiz) -> AppResult<Self> {
        if quiz.questions.is_empty() {
            return Err(AppError::NotFound(format!(
                "Quiz '{}' has no questions",
                quiz.id
            )));
        }

        let now = Utc::now();
        Ok(QuizSession {
            id: Uuid::new_v4().to_string(),
            quiz,
            state: SessionState::InProgress {
                current_index: 0,
                answers: Vec::new(),
            },
            question_shown_at: now,
            last_active: now,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// True once `ttl` has passed without any call reaching the session.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active >= ttl
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, SessionState::Complete { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            SessionState::InProgress { current_index, .. }
            | SessionState::AwaitingSubmitConfirmation { current_index, .. } => {
                Some(*current_index)
            }
            SessionState::Complete { .. } => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|i| self.quiz.questions.get(i))
    }

    pub fn answers(&self) -> &[UserAnswer] {
        match &self.state {
            SessionState::InProgress { answers, .. }
            | SessionState::AwaitingSubmitConfirmation { answers, .. } => answers,
            SessionState::Complete { attempt } => &attempt.answers,
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&UserAnswer> {
        self.answers().iter().find(|a| a.question_id == question_id)
    }

    pub fn attempt(&self) -> Option<&QuizAttempt> {
        match &self.state {
            SessionState::Complete { attempt } => Some(attempt),
            _ => None,
        }
    }

    /// Records or replaces the answer for `question_id`. Without an explicit
    /// `time_spent` the seconds since the current question was shown are used.
    pub fn answer(
        &mut self,
        question_id: &str,
        selected_answer: u32,
        time_spent: Option<u32>,
    ) -> AppResult<UserAnswer> {
        let elapsed = self.seconds_on_question();

        let answers = match &mut self.state {
            SessionState::InProgress { answers, .. } => answers,
            other => return Err(rejected("answer", other)),
        };

        let question = self
            .quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Question '{}' is not part of quiz '{}'",
                    question_id, self.quiz.id
                ))
            })?;

        if !question.has_option(selected_answer) {
            return Err(AppError::ValidationError(format!(
                "Option {} does not exist on question '{}' ({} options)",
                selected_answer,
                question_id,
                question.options.len()
            )));
        }

        let answer = UserAnswer {
            question_id: question.id.clone(),
            selected_answer,
            is_correct: question.is_correct(selected_answer),
            time_spent: time_spent.unwrap_or(elapsed),
        };

        match answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer.clone(),
            None => answers.push(answer.clone()),
        }

        Ok(answer)
    }

    /// Stays on the last question instead of moving past it.
    pub fn advance(&mut self) -> AppResult<usize> {
        let last = self.total_questions().saturating_sub(1);
        self.navigate("advance", |index| (index < last).then(|| index + 1))
    }

    pub fn retreat(&mut self) -> AppResult<usize> {
        self.navigate("retreat", |index| index.checked_sub(1))
    }

    pub fn submit(&mut self) -> AppResult<SubmitOutcome> {
        let total = self.total_questions();
        let (current_index, answered) = match &self.state {
            SessionState::InProgress {
                current_index,
                answers,
            } => (*current_index, answers.len()),
            other => return Err(rejected("submit", other)),
        };

        if answered < total {
            let answers = self.take_answers();
            self.state = SessionState::AwaitingSubmitConfirmation {
                current_index,
                answers,
            };
            return Ok(SubmitOutcome::NeedsConfirmation { answered, total });
        }

        Ok(SubmitOutcome::Completed(self.complete()))
    }

    pub fn confirm_submit(&mut self) -> AppResult<QuizAttempt> {
        match &self.state {
            SessionState::AwaitingSubmitConfirmation { .. } => Ok(self.complete()),
            other => Err(rejected("confirm submit", other)),
        }
    }

    pub fn cancel_submit(&mut self) -> AppResult<usize> {
        let (current_index, answers) = match &mut self.state {
            SessionState::AwaitingSubmitConfirmation {
                current_index,
                answers,
            } => (*current_index, std::mem::take(answers)),
            other => return Err(rejected("cancel submit", other)),
        };

        self.state = SessionState::InProgress {
            current_index,
            answers,
        };
        Ok(current_index)
    }

    /// Starts the same quiz over with no answers.
    pub fn restart(&mut self) -> AppResult<()> {
        if !self.is_complete() {
            return Err(rejected("restart", &self.state));
        }

        self.state = SessionState::InProgress {
            current_index: 0,
            answers: Vec::new(),
        };
        self.question_shown_at = Utc::now();
        Ok(())
    }

    fn navigate(
        &mut self,
        operation: &str,
        step: impl FnOnce(usize) -> Option<usize>,
    ) -> AppResult<usize> {
        let current_index = match &mut self.state {
            SessionState::InProgress { current_index, .. } => current_index,
            other => return Err(rejected(operation, other)),
        };

        match step(*current_index) {
            Some(next) => {
                *current_index = next;
                self.question_shown_at = Utc::now();
                Ok(next)
            }
            None => Ok(*current_index),
        }
    }

    fn take_answers(&mut self) -> Vec<UserAnswer> {
        match &mut self.state {
            SessionState::InProgress { answers, .. }
            | SessionState::AwaitingSubmitConfirmation { answers, .. } => {
                std::mem::take(answers)
            }
            SessionState::Complete { .. } => Vec::new(),
        }
    }

    fn complete(&mut self) -> QuizAttempt {
        let answers = self.take_answers();
        let attempt = QuizAttempt::grade(&self.quiz, answers, Utc::now());
        self.state = SessionState::Complete {
            attempt: attempt.clone(),
        };
        attempt
    }

    fn seconds_on_question(&self) -> u32 {
        let seconds = (Utc::now() - self.question_shown_at).num_seconds();
        u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
    }
}

fn rejected(operation: &str, state: &SessionState) -> AppError {
    AppError::InvalidSessionState(format!(
        "cannot {} while the session is {}",
        operation,
        state.label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(correct: &[u32]) -> Quiz {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    &format!("Question {}", i + 1),
                    vec!["a".into(), "b".into(), "c".into()],
                    c,
                    Some(format!("Because {}", c)),
                )
            })
            .collect();
        Quiz::new("Session quiz", questions, None)
    }

    fn question_id(session: &QuizSession, index: usize) -> String {
        session.quiz().questions[index].id.clone()
    }

    #[test]
    fn starts_in_progress_at_first_question() {
        let session = QuizSession::start(quiz(&[0, 1])).unwrap();

        assert_eq!(session.current_index(), Some(0));
        assert!(session.answers().is_empty());
        assert_eq!(session.state().label(), "in progress");
    }

    #[test]
    fn empty_quiz_cannot_start() {
        let result = QuizSession::start(Quiz::new("Empty", vec![], None));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn answering_sets_correctness_without_moving() {
        let mut session = QuizSession::start(quiz(&[1, 0])).unwrap();
        let q1 = question_id(&session, 0);

        let answer = session.answer(&q1, 1, Some(7)).unwrap();

        assert!(answer.is_correct);
        assert_eq!(answer.time_spent, 7);
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn answering_twice_replaces_previous_answer() {
        let mut session = QuizSession::start(quiz(&[1, 0])).unwrap();
        let q1 = question_id(&session, 0);

        session.answer(&q1, 0, Some(3)).unwrap();
        session.answer(&q1, 1, Some(5)).unwrap();

        assert_eq!(session.answers().len(), 1);
        let recorded = session.answer_for(&q1).unwrap();
        assert_eq!(recorded.selected_answer, 1);
        assert!(recorded.is_correct);
        assert_eq!(recorded.time_spent, 5);
    }

    #[test]
    fn answer_rejects_unknown_question_and_option() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        let q1 = question_id(&session, 0);

        assert!(matches!(
            session.answer("nope", 0, Some(1)),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            session.answer(&q1, 3, Some(1)),
            Err(AppError::ValidationError(_))
        ));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut session = QuizSession::start(quiz(&[0, 0, 0])).unwrap();

        assert_eq!(session.retreat().unwrap(), 0);
        assert_eq!(session.advance().unwrap(), 1);
        assert_eq!(session.advance().unwrap(), 2);
        assert_eq!(session.advance().unwrap(), 2);
        assert!(!session.is_complete());
        assert_eq!(session.retreat().unwrap(), 1);
    }

    #[test]
    fn fully_answered_submit_completes() {
        let mut session = QuizSession::start(quiz(&[0, 1, 2])).unwrap();
        for (i, selected) in [0, 1, 1].into_iter().enumerate() {
            let id = question_id(&session, i);
            session.answer(&id, selected, Some(10)).unwrap();
        }

        let outcome = session.submit().unwrap();

        let attempt = match outcome {
            SubmitOutcome::Completed(attempt) => attempt,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(attempt.score, 67);
        assert_eq!(attempt.correct_answers, 2);
        assert_eq!(attempt.time_spent, 30);
        assert!(session.is_complete());
        assert_eq!(session.attempt(), Some(&attempt));
    }

    #[test]
    fn partial_submit_requires_confirmation() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        let q1 = question_id(&session, 0);
        session.answer(&q1, 0, Some(4)).unwrap();

        let outcome = session.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::NeedsConfirmation {
                answered: 1,
                total: 2
            }
        );
        assert_eq!(session.state().label(), "awaiting submit confirmation");

        let attempt = session.confirm_submit().unwrap();
        assert_eq!(attempt.correct_answers, 1);
        assert_eq!(attempt.total_questions, 2);
        assert_eq!(attempt.score, 50);
        assert_eq!(attempt.answers.len(), 1);
    }

    #[test]
    fn cancel_submit_returns_to_same_position() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        session.advance().unwrap();
        let q2 = question_id(&session, 1);
        session.answer(&q2, 1, Some(2)).unwrap();

        session.submit().unwrap();
        assert_eq!(session.cancel_submit().unwrap(), 1);
        assert_eq!(session.current_index(), Some(1));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn operations_outside_their_state_are_rejected() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        assert!(matches!(
            session.confirm_submit(),
            Err(AppError::InvalidSessionState(_))
        ));
        assert!(session.cancel_submit().is_err());
        assert!(session.restart().is_err());

        session.submit().unwrap();
        assert!(session.advance().is_err());
        assert!(session.submit().is_err());

        session.confirm_submit().unwrap();
        let q1 = question_id(&session, 0);
        assert!(matches!(
            session.answer(&q1, 0, Some(1)),
            Err(AppError::InvalidSessionState(_))
        ));
        assert!(session.retreat().is_err());
        assert_eq!(session.attempt().map(|a| a.score), Some(0));
    }

    #[test]
    fn restart_clears_answers_and_keeps_quiz() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        let q1 = question_id(&session, 0);
        session.answer(&q1, 0, Some(1)).unwrap();
        session.submit().unwrap();

        session.restart().unwrap();

        assert_eq!(session.current_index(), Some(0));
        assert!(session.answers().is_empty());
        assert_eq!(session.quiz().title, "Session quiz");
    }

    #[test]
    fn answer_without_time_uses_question_timer() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        let q1 = question_id(&session, 0);

        let answer = session.answer(&q1, 0, None).unwrap();

        assert!(answer.time_spent < 5);
    }

    #[test]
    fn huge_answer_times_saturate_instead_of_overflowing() {
        let mut session = QuizSession::start(quiz(&[0, 1])).unwrap();
        let q1 = question_id(&session, 0);
        let q2 = question_id(&session, 1);
        session.answer(&q1, 0, Some(u32::MAX)).unwrap();
        session.answer(&q2, 1, Some(10)).unwrap();

        let attempt = match session.submit().unwrap() {
            SubmitOutcome::Completed(attempt) => attempt,
            other => panic!("expected completion, got {:?}", other),
        };

        assert_eq!(attempt.time_spent, u32::MAX);
        assert_eq!(attempt.answers.len(), 2);
        assert_eq!(attempt.score, 100);
        assert!(session.is_complete());
    }

    #[test]
    fn expiry_follows_last_activity() {
        let mut session = QuizSession::start(quiz(&[0])).unwrap();
        let ttl = Duration::minutes(30);
        let started = session.last_active();

        assert!(!session.is_expired(ttl, started + Duration::minutes(29)));
        assert!(session.is_expired(ttl, started + Duration::minutes(30)));

        session.touch();
        assert!(session.last_active() >= started);
        assert!(!session.is_expired(ttl, session.last_active()));
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let session = QuizSession::start(quiz(&[0])).unwrap();
        let json = serde_json::to_value(session.state()).unwrap();

        assert_eq!(json["status"], "inProgress");
        assert_eq!(json["currentIndex"], 0);
    }
}
