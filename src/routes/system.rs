use actix_web::{web, HttpResponse, Responder};
use crate::models::{HealthResponse, ServiceInfoResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check));
}

/// Service banner
///
/// GET /
async fn service_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "Match Now API Server is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        environment: state.environment.clone(),
    })
}

/// Health check endpoint
///
/// GET /health
///
/// Answers 503 when the database cannot be reached.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match state.postgres.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        database: if db_healthy { "connected" } else { "disconnected" }.to_string(),
    };

    if db_healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
