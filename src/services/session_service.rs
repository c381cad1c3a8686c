use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{QuizAttempt, QuizSession, SubmitOutcome},
        dto::{
            request::AnswerRequest,
            response::{AnswerFeedback, NavigationResponse, SessionView, SubmitResponse},
        },
    },
    services::{quiz_attempt_service::QuizAttemptService, quiz_service::QuizService},
};

/// Live quiz sessions, keyed by session id. Sessions are never persisted;
/// only the attempt produced on completion is.
///
/// A session nobody has called for `session_ttl` is dropped. Expired entries
/// are swept whenever the map is locked for writing.
pub struct SessionService {
    sessions: RwLock<HashMap<String, QuizSession>>,
    quiz_service: Arc<QuizService>,
    attempt_service: Arc<QuizAttemptService>,
    session_ttl: Duration,
}

impl SessionService {
    pub fn new(
        quiz_service: Arc<QuizService>,
        attempt_service: Arc<QuizAttemptService>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            quiz_service,
            attempt_service,
            session_ttl,
        }
    }

    pub async fn start(&self, quiz_id: &str) -> AppResult<SessionView> {
        let quiz = self.quiz_service.get_quiz(quiz_id).await?;
        let session = QuizSession::start(quiz)?;
        let view = SessionView::from(&session);

        log::info!("Started session {} for quiz {}", session.id(), quiz_id);
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions);
        sessions.insert(session.id().to_string(), session);
        Ok(view)
    }

    pub async fn get(&self, id: &str) -> AppResult<SessionView> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .filter(|session| !session.is_expired(self.session_ttl, Utc::now()))
            .map(SessionView::from)
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn active_sessions(&self) -> usize {
        let now = Utc::now();
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|session| !session.is_expired(self.session_ttl, now))
            .count()
    }

    pub async fn answer(&self, id: &str, request: AnswerRequest) -> AppResult<AnswerFeedback> {
        request.validate()?;

        self.with_session(id, |session| {
            let answer = session.answer(
                &request.question_id,
                request.selected_answer,
                request.time_spent,
            )?;
            let question = session
                .quiz()
                .find_question(&answer.question_id)
                .ok_or_else(|| AppError::InternalError("answered question vanished".into()))?;

            Ok(AnswerFeedback {
                session_id: session.id().to_string(),
                correct_answer: question.correct_answer,
                explanation: question.explanation.clone(),
                answer,
            })
        })
        .await
    }

    pub async fn advance(&self, id: &str) -> AppResult<NavigationResponse> {
        self.with_session(id, |session| {
            let current_index = session.advance()?;
            Ok(navigation(session, current_index))
        })
        .await
    }

    pub async fn retreat(&self, id: &str) -> AppResult<NavigationResponse> {
        self.with_session(id, |session| {
            let current_index = session.retreat()?;
            Ok(navigation(session, current_index))
        })
        .await
    }

    pub async fn submit(&self, id: &str) -> AppResult<SubmitResponse> {
        let outcome = self.with_session(id, QuizSession::submit).await?;

        match outcome {
            SubmitOutcome::Completed(attempt) => {
                let attempt = self.attempt_service.record(attempt).await?;
                Ok(SubmitResponse::Complete { attempt })
            }
            pending => {
                log::debug!("Session {} awaiting submit confirmation", id);
                Ok(pending.into())
            }
        }
    }

    pub async fn confirm_submit(&self, id: &str) -> AppResult<QuizAttempt> {
        let attempt = self.with_session(id, QuizSession::confirm_submit).await?;
        self.attempt_service.record(attempt).await
    }

    pub async fn cancel_submit(&self, id: &str) -> AppResult<NavigationResponse> {
        self.with_session(id, |session| {
            let current_index = session.cancel_submit()?;
            Ok(navigation(session, current_index))
        })
        .await
    }

    pub async fn restart(&self, id: &str) -> AppResult<SessionView> {
        self.with_session(id, |session| {
            session.restart()?;
            Ok(SessionView::from(&*session))
        })
        .await
    }

    pub async fn discard(&self, id: &str) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| log::debug!("Discarded session {}", id))
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `f` under the write lock. Rejected operations are logged and leave
    /// the session as it was.
    async fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut QuizSession) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions);
        let session = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
        session.touch();

        f(session).map_err(|err| {
            log::warn!("Session {} rejected operation: {}", id, err);
            err
        })
    }

    fn sweep(&self, sessions: &mut HashMap<String, QuizSession>) {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.session_ttl, now));

        let expired = before - sessions.len();
        if expired > 0 {
            log::debug!("Dropped {} expired sessions", expired);
        }
    }
}

fn navigation(session: &QuizSession, current_index: usize) -> NavigationResponse {
    NavigationResponse {
        session_id: session.id().to_string(),
        current_index,
    }
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Session with id '{}' not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::Database,
        repositories::{MockQuizRepository, StoreQuizAttemptRepository},
    };

    fn service() -> (SessionService, Arc<QuizAttemptService>) {
        service_with_ttl(Duration::hours(1))
    }

    fn service_with_ttl(ttl: Duration) -> (SessionService, Arc<QuizAttemptService>) {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| Ok(None));

        let attempts = Arc::new(QuizAttemptService::new(Arc::new(
            StoreQuizAttemptRepository::new(&Database::in_memory(), "attempts"),
        )));
        let quiz_service = Arc::new(QuizService::new(Arc::new(quizzes)));

        (
            SessionService::new(quiz_service, Arc::clone(&attempts), ttl),
            attempts,
        )
    }

    fn answer(question_id: &str, selected_answer: u32) -> AnswerRequest {
        AnswerRequest {
            question_id: question_id.to_string(),
            selected_answer,
            time_spent: Some(5),
        }
    }

    #[actix_rt::test]
    async fn test_full_run_records_one_attempt() {
        let (service, attempts) = service();
        let view = service.start("1").await.unwrap();
        let ids: Vec<String> = view.questions.iter().map(|q| q.id.clone()).collect();

        for (id, selected) in ids.iter().zip([0, 2, 1, 3]) {
            service.answer(&view.session_id, answer(id, selected)).await.unwrap();
        }

        let response = service.submit(&view.session_id).await.unwrap();
        let attempt = match response {
            SubmitResponse::Complete { attempt } => attempt,
            other => panic!("unexpected response: {:?}", other),
        };

        assert_eq!(attempt.correct_answers, 3);
        assert_eq!(attempt.score, 75);
        assert_eq!(attempt.time_spent, 20);

        let stored = attempts.list_attempts().await.unwrap();
        assert_eq!(stored, vec![attempt]);

        assert!(service.submit(&view.session_id).await.is_err());
        assert_eq!(attempts.list_attempts().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_partial_submit_waits_for_confirmation() {
        let (service, attempts) = service();
        let view = service.start("2").await.unwrap();
        let first = view.questions[0].id.clone();

        service.answer(&view.session_id, answer(&first, 2)).await.unwrap();
        let response = service.submit(&view.session_id).await.unwrap();

        assert!(matches!(
            response,
            SubmitResponse::AwaitingSubmitConfirmation { answered: 1, .. }
        ));
        assert!(attempts.list_attempts().await.unwrap().is_empty());

        let attempt = service.confirm_submit(&view.session_id).await.unwrap();
        assert_eq!(attempt.correct_answers, 1);
        assert_eq!(attempt.total_questions, 4);
        assert_eq!(attempts.list_attempts().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_answer_feedback_reveals_key() {
        let (service, _) = service();
        let view = service.start("1").await.unwrap();
        let first = view.questions[0].id.clone();

        let feedback = service
            .answer(&view.session_id, answer(&first, 3))
            .await
            .unwrap();

        assert!(!feedback.answer.is_correct);
        assert_eq!(feedback.correct_answer, 0);
        assert!(feedback.explanation.is_some());
    }

    #[actix_rt::test]
    async fn test_unknown_session_and_quiz() {
        let (service, _) = service();

        assert!(matches!(
            service.get("missing").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.start("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_restart_and_discard() {
        let (service, _) = service();
        let view = service.start("3").await.unwrap();

        service.submit(&view.session_id).await.unwrap();
        service.confirm_submit(&view.session_id).await.unwrap();

        let restarted = service.restart(&view.session_id).await.unwrap();
        assert_eq!(restarted.status, "inProgress");
        assert_eq!(restarted.answered_count, 0);
        assert_eq!(restarted.session_id, view.session_id);

        service.discard(&view.session_id).await.unwrap();
        assert!(service.get(&view.session_id).await.is_err());
    }

    #[actix_rt::test]
    async fn test_navigation_round_trip() {
        let (service, _) = service();
        let view = service.start("1").await.unwrap();

        assert_eq!(service.advance(&view.session_id).await.unwrap().current_index, 1);
        assert_eq!(service.retreat(&view.session_id).await.unwrap().current_index, 0);

        service.submit(&view.session_id).await.unwrap();
        assert!(matches!(
            service.advance(&view.session_id).await,
            Err(AppError::InvalidSessionState(_))
        ));
        assert_eq!(service.cancel_submit(&view.session_id).await.unwrap().current_index, 0);
    }

    #[actix_rt::test]
    async fn test_out_of_range_time_is_rejected_and_answers_kept() {
        let (service, _) = service();
        let view = service.start("1").await.unwrap();
        let first = view.questions[0].id.clone();
        service.answer(&view.session_id, answer(&first, 0)).await.unwrap();

        let mut too_long = answer(&first, 1);
        too_long.time_spent = Some(u32::MAX);
        assert!(matches!(
            service.answer(&view.session_id, too_long).await,
            Err(AppError::ValidationError(_))
        ));

        let view = service.get(&view.session_id).await.unwrap();
        assert_eq!(view.answered_count, 1);
        assert_eq!(view.questions[0].selected_answer, Some(0));
    }

    #[actix_rt::test]
    async fn test_expired_session_is_not_found() {
        let (service, _) = service_with_ttl(Duration::zero());
        let view = service.start("1").await.unwrap();
        let first = view.questions[0].id.clone();

        assert!(matches!(
            service.get(&view.session_id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.answer(&view.session_id, answer(&first, 0)).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.active_sessions().await, 0);
    }

    #[actix_rt::test]
    async fn test_live_sessions_survive_sweep() {
        let (service, _) = service();
        let first = service.start("1").await.unwrap();
        service.start("2").await.unwrap();

        assert_eq!(service.active_sessions().await, 2);
        assert!(service.get(&first.session_id).await.is_ok());
    }
}
