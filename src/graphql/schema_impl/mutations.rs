use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    models::{domain::Quiz, dto::request::CreateQuizRequest},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_quiz(&self, ctx: &Context<'_>, input: CreateQuizRequest) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.create_quiz(input).await.extend()
    }

    /// `contents` is the raw text of an exported quiz file.
    async fn import_quiz(&self, ctx: &Context<'_>, contents: String) -> Result<Quiz> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.import_quiz(&contents).await.extend()
    }

    async fn delete_quiz(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        state.quiz_service.delete_quiz(&id).await.extend()?;
        Ok(true)
    }
}
