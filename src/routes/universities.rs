use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::models::{ErrorResponse, University, UniversityQuery};
use crate::routes::AppState;
use crate::services::{CacheKey, CatalogError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/universities", web::get().to(list_universities))
        .route("/universities/{id}", web::get().to(get_university));
}

/// Full catalog listing behind the cache; search/country filters go straight
/// to the database since their result sets are small and query-dependent.
pub(crate) async fn cached_universities(
    state: &AppState,
) -> Result<Vec<University>, CatalogError> {
    let key = CacheKey::universities();

    match state.cache.get::<Vec<University>>(&key).await {
        Ok(Some(universities)) => return Ok(universities),
        Ok(None) => {}
        Err(e) => tracing::warn!("University cache read failed: {}", e),
    }

    let universities = state.catalog.list_all().await?;

    if let Err(e) = state.cache.set(&key, &universities).await {
        tracing::warn!("Failed to cache university catalog: {}", e);
    }

    Ok(universities)
}

/// University catalog endpoint
///
/// GET /api/v1/universities?q={name}&country={country}
async fn list_universities(
    state: web::Data<AppState>,
    query: web::Query<UniversityQuery>,
) -> HttpResponse {
    let result = match (&query.q, &query.country) {
        (Some(q), _) => state.catalog.search(q).await,
        (None, Some(country)) => state.catalog.by_country(country).await,
        (None, None) => cached_universities(&state).await,
    };

    match result {
        Ok(universities) => HttpResponse::Ok().json(universities),
        Err(e) => {
            tracing::error!("Failed to list universities: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list universities".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// GET /api/v1/universities/{id}
async fn get_university(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state.catalog.get(id).await {
        Ok(Some(university)) => HttpResponse::Ok().json(university),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "University not found".to_string(),
            message: format!("No university with id {}", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch university {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch university".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
