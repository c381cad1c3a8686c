use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::AnswerRequest, response::MessageResponse},
};

#[post("/api/quizzes/{id}/sessions")]
pub async fn start_session(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.start(&quiz_id).await?;
    Ok(HttpResponse::Created().json(view))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[delete("/api/sessions/{id}")]
pub async fn discard_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.session_service.discard(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Session '{}' discarded", id),
    }))
}

#[post("/api/sessions/{id}/answers")]
pub async fn answer_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<AnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let feedback = state
        .session_service
        .answer(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(feedback))
}

#[post("/api/sessions/{id}/advance")]
pub async fn advance(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let position = state.session_service.advance(&id).await?;
    Ok(HttpResponse::Ok().json(position))
}

#[post("/api/sessions/{id}/retreat")]
pub async fn retreat(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let position = state.session_service.retreat(&id).await?;
    Ok(HttpResponse::Ok().json(position))
}

#[post("/api/sessions/{id}/submit")]
pub async fn submit(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.session_service.submit(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/confirm")]
pub async fn confirm_submit(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.session_service.confirm_submit(&id).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

#[post("/api/sessions/{id}/cancel")]
pub async fn cancel_submit(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let position = state.session_service.cancel_submit(&id).await?;
    Ok(HttpResponse::Ok().json(position))
}

#[post("/api/sessions/{id}/restart")]
pub async fn restart(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let view = state.session_service.restart(&id).await?;
    Ok(HttpResponse::Ok().json(view))
}
