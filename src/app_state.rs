use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{StoreQuizAttemptRepository, StoreQuizRepository},
    services::{
        generation_service::GenerationService,
        question_generator::{GenerationParams, HttpQuestionGenerator, QuestionGenerator},
        quiz_attempt_service::QuizAttemptService,
        quiz_service::QuizService,
        session_service::SessionService,
        stats_service::StatsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub stats_service: Arc<StatsService>,
    pub session_service: Arc<SessionService>,
    pub generation_service: Arc<GenerationService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let db = Database::open(&config)?;
        let generator = Arc::new(HttpQuestionGenerator::new(&config)?);
        Ok(Self::with_parts(config, db, generator))
    }

    /// Wires services over an already opened store and generator.
    pub fn with_parts(
        config: Config,
        db: Database,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Self {
        let quiz_repository = Arc::new(StoreQuizRepository::new(&db, &config.quizzes_key));
        let attempt_repository =
            Arc::new(StoreQuizAttemptRepository::new(&db, &config.attempts_key));

        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let attempt_service = Arc::new(QuizAttemptService::new(attempt_repository.clone()));
        let stats_service = Arc::new(StatsService::new(
            attempt_repository,
            config.recent_scores_window,
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&quiz_service),
            Arc::clone(&attempt_service),
            config.session_ttl(),
        ));
        let generation_service = Arc::new(GenerationService::new(
            generator,
            quiz_repository,
            GenerationParams::from_config(&config),
        ));

        Self {
            quiz_service,
            attempt_service,
            stats_service,
            session_service,
            generation_service,
            db,
            config: Arc::new(config),
        }
    }
}
