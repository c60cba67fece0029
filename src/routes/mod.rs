// Route exports
pub mod system;
pub mod users;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;
use validator::ValidationErrors;
use crate::config::PaginationSettings;
use crate::core::{MatchError, Matcher};
use crate::models::ErrorResponse;
use crate::services::{CacheManager, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub pagination: PaginationSettings,
    pub environment: String,
    pub started_at: Instant,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(system::configure)
        .service(web::scope("/users").configure(users::configure));
}

/// CORS policy: listed origins with credentials, or permissive when none are set
pub fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    origins.iter().fold(
        Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        |cors, origin| cors.allowed_origin(origin),
    )
}

/// JSON extractor config answering malformed bodies with `ErrorResponse`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

/// Query extractor config answering malformed query strings with `ErrorResponse`
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_query", format!("Invalid query: {}", err)).into()
}

/// Parse a path identifier, rejecting anything that is not a UUID
pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid, ErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad request", "Invalid id format")
    })
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<ValidationErrors> for ErrorResponse {
    fn from(errors: ValidationErrors) -> Self {
        ErrorResponse::new(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
    }
}

impl From<PostgresError> for ErrorResponse {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::NotFound(message) => {
                ErrorResponse::new(StatusCode::NOT_FOUND, "Not found", message)
            }
            PostgresError::Conflict(message) => {
                ErrorResponse::new(StatusCode::CONFLICT, "Conflict", message)
            }
            PostgresError::InvalidInput(message) => {
                ErrorResponse::new(StatusCode::BAD_REQUEST, "Bad request", message)
            }
            other => {
                tracing::error!("Database failure: {}", other);
                ErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error",
                    "Internal server error",
                )
            }
        }
    }
}

impl From<MatchError> for ErrorResponse {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidInput(reason) => {
                tracing::debug!("Ranking rejected: {}", reason);
                ErrorResponse::new(StatusCode::NOT_FOUND, "Not found", "User not found")
            }
        }
    }
}
