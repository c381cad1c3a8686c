use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the store answers. The generator is reported but not required,
/// since only quiz generation depends on it.
#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let store_health = state.db.health_check().await;
    let generator_health = state.generation_service.generator_health().await;

    if let Err(err) = &generator_health {
        log::debug!("Question generator not available: {}", err);
    }

    let response = serde_json::json!({
        "status": if store_health.is_ok() { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "store": if store_health.is_ok() { "ok" } else { "error" },
            "generator": if generator_health.is_ok() { "ok" } else { "unavailable" }
        }
    });

    if store_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
