use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::AttemptsQuery};

/// Without `limit` the whole history is returned in storage order.
#[get("/api/attempts")]
pub async fn list_attempts(
    state: web::Data<AppState>,
    query: web::Query<AttemptsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let attempts = match query.limit {
        Some(limit) => state.attempt_service.recent_attempts(limit).await?,
        None => state.attempt_service.list_attempts().await?,
    };
    Ok(HttpResponse::Ok().json(attempts))
}

#[get("/api/attempts/{id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.get_attempt(&id).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

#[get("/api/stats")]
pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = state.stats_service.dashboard().await?;
    Ok(HttpResponse::Ok().json(stats))
}
