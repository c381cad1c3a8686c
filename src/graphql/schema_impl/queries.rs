use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    models::domain::{Quiz, QuizAttempt, QuizStats},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Built-in quizzes first, then stored ones.
    async fn quizzes(&self, ctx: &Context<'_>) -> Result<Vec<Quiz>> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.list_quizzes().await.extend()
    }

    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.get_quiz(&id).await.extend()
    }

    /// The last `limit` attempts, or the whole history.
    async fn attempts(&self, ctx: &Context<'_>, limit: Option<u32>) -> Result<Vec<QuizAttempt>> {
        let state = ctx.data::<AppState>()?;
        match limit {
            Some(limit) => state
                .attempt_service
                .recent_attempts(limit as usize)
                .await
                .extend(),
            None => state.attempt_service.list_attempts().await.extend(),
        }
    }

    async fn attempt(&self, ctx: &Context<'_>, id: ID) -> Result<QuizAttempt> {
        let state = ctx.data::<AppState>()?;
        state.attempt_service.get_attempt(&id).await.extend()
    }

    async fn stats(&self, ctx: &Context<'_>) -> Result<QuizStats> {
        let state = ctx.data::<AppState>()?;
        state.stats_service.dashboard().await.extend()
    }
}
