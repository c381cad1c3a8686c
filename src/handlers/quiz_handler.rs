use std::path::Path;

use actix_web::{
    delete, get,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, put, web, HttpResponse,
};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        quiz_file::QuizFile,
        request::{CreateQuizRequest, GenerateQuizRequest, GenerateUploadQuery, QuestionInput},
        response::MessageResponse,
    },
    services::{generation_service::DEFAULT_GENERATED_TITLE, question_generator::GenerationSource},
};

#[get("/api/quizzes")]
pub async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[post("/api/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.create_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/api/quizzes/import/schema")]
pub async fn import_schema() -> HttpResponse {
    HttpResponse::Ok().json(QuizFile::schema())
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/quizzes/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("Quiz '{}' deleted", id),
    }))
}

#[post("/api/quizzes/{id}/questions")]
pub async fn add_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<QuestionInput>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .add_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[put("/api/quizzes/{id}/questions/{index}")]
pub async fn update_question(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
    request: web::Json<QuestionInput>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let quiz = state
        .quiz_service
        .update_question(&id, index, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/api/quizzes/{id}/questions/{index}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    path: web::Path<(String, usize)>,
) -> Result<HttpResponse, AppError> {
    let (id, index) = path.into_inner();
    let quiz = state.quiz_service.delete_question(&id, index).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

/// The body is the raw contents of an exported quiz file.
#[post("/api/quizzes/import")]
pub async fn import_quiz(
    state: web::Data<AppState>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.import_quiz(&body).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/api/quizzes/{id}/export")]
pub async fn export_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let export = state.quiz_service.export_quiz(&id).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export.file_name)],
        })
        .body(export.contents))
}

#[post("/api/quizzes/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let params = state.generation_service.defaults().with_overrides(
        request.questions_per_chunk,
        request.chunk_size,
        request.overlap,
    )?;
    let title = request.title.as_deref().unwrap_or(DEFAULT_GENERATED_TITLE);

    let quiz = state
        .generation_service
        .generate_quiz(title, GenerationSource::Text(request.text), params)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

/// The body is the raw document; its name and options come from the query.
#[post("/api/quizzes/generate/upload")]
pub async fn generate_quiz_from_upload(
    state: web::Data<AppState>,
    query: web::Query<GenerateUploadQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let params = state.generation_service.defaults().with_overrides(
        query.questions_per_chunk,
        query.chunk_size,
        query.overlap,
    )?;
    let source = GenerationSource::file(&query.file_name, body.to_vec())?;
    let title = query.title.unwrap_or_else(|| {
        Path::new(&query.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_GENERATED_TITLE.to_string())
    });

    let quiz = state
        .generation_service
        .generate_quiz(&title, source, params)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}
