// Route exports
pub mod dashboard;
pub mod portfolio;
pub mod universities;

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::StatsEngine;
use crate::models::ErrorResponse;
use crate::services::{
    CacheManager, PortfolioService, SupabaseClient, SupabaseError, TokenVerifier,
    UniversityCatalog,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub catalog: Arc<UniversityCatalog>,
    pub portfolio: Arc<PortfolioService>,
    pub engine: StatsEngine,
    pub verifier: Option<TokenVerifier>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(dashboard::configure)
            .configure(portfolio::configure)
            .configure(universities::configure),
    );
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the acting user: a valid bearer token wins over any explicit
/// `userId`; without a token the explicit id is required.
pub(crate) fn resolve_user(
    req: &HttpRequest,
    explicit: Option<Uuid>,
    state: &AppState,
) -> Result<Uuid, HttpResponse> {
    if let (Some(verifier), Some(token)) = (&state.verifier, bearer_token(req)) {
        return verifier.user_id(token).map_err(|e| {
            tracing::info!("Rejected bearer token: {}", e);
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "invalid_token".to_string(),
                message: e.to_string(),
                status_code: 401,
            })
        });
    }

    explicit.ok_or_else(|| {
        HttpResponse::BadRequest().json(ErrorResponse {
            error: "missing_user".to_string(),
            message: "userId is required when no bearer token is supplied".to_string(),
            status_code: 400,
        })
    })
}

/// Map a backend error onto an HTTP response
pub(crate) fn supabase_error(error: SupabaseError, context: &str) -> HttpResponse {
    tracing::error!("{}: {}", context, error);
    match error {
        SupabaseError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: context.to_string(),
            message: error.to_string(),
            status_code: 404,
        }),
        _ => HttpResponse::InternalServerError().json(ErrorResponse {
            error: context.to_string(),
            message: error.to_string(),
            status_code: 500,
        }),
    }
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
