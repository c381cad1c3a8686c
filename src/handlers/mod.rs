pub mod attempt_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod session_handler;

use actix_web::web;

/// Largest document accepted by the upload endpoint.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Registers every REST route plus the GraphQL endpoints. The caller provides
/// `AppState` and the GraphQL `Schema` as app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .service(quiz_handler::list_quizzes)
        .service(quiz_handler::create_quiz)
        .service(quiz_handler::import_schema)
        .service(quiz_handler::import_quiz)
        .service(quiz_handler::generate_quiz)
        .service(quiz_handler::generate_quiz_from_upload)
        .service(quiz_handler::get_quiz)
        .service(quiz_handler::delete_quiz)
        .service(quiz_handler::export_quiz)
        .service(quiz_handler::add_question)
        .service(quiz_handler::update_question)
        .service(quiz_handler::delete_question)
        .service(session_handler::start_session)
        .service(session_handler::get_session)
        .service(session_handler::discard_session)
        .service(session_handler::answer_question)
        .service(session_handler::advance)
        .service(session_handler::retreat)
        .service(session_handler::submit)
        .service(session_handler::confirm_submit)
        .service(session_handler::cancel_submit)
        .service(session_handler::restart)
        .service(attempt_handler::list_attempts)
        .service(attempt_handler::get_attempt)
        .service(attempt_handler::get_stats)
        .service(graphql_handler::graphql)
        .service(graphql_handler::graphiql);
}
