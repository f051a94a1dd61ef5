use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::models::{DashboardResponse, HealthResponse, RiskCounts, UserQuery};
use crate::routes::{resolve_user, supabase_error, AppState};
use crate::routes::universities::cached_universities;

/// How many catalog universities to suggest when a user has no targets yet
const SUGGESTED_UNIVERSITIES: usize = 3;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/stats/dashboard", web::get().to(get_dashboard));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.catalog.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Derived dashboard statistics endpoint
///
/// GET /api/v1/stats/dashboard?userId={uuid}
///
/// Aggregates the user's portfolio (cached) and runs the scoring engine
/// over it. Users with no targets yet get risk classifications for a few
/// suggested universities from the catalog instead, matching what the
/// dashboard shows during onboarding.
async fn get_dashboard(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
    http_req: HttpRequest,
) -> HttpResponse {
    let user_id = match resolve_user(&http_req, query.user_id, &state) {
        Ok(id) => id,
        Err(response) => return response,
    };

    tracing::info!("Deriving dashboard stats for user: {}", user_id);

    let snapshot = match state.portfolio.snapshot(user_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => return supabase_error(e, "Failed to aggregate portfolio"),
    };

    let mut stats = state.engine.dashboard(&snapshot);

    if stats.risks.is_empty() {
        match cached_universities(&state).await {
            Ok(universities) => {
                let suggestions: Vec<_> = universities
                    .into_iter()
                    .take(SUGGESTED_UNIVERSITIES)
                    .collect();
                stats.risks = state
                    .engine
                    .classify_all(stats.gpa, stats.best_sat, &suggestions);

                let mut counts = RiskCounts::default();
                for entry in &stats.risks {
                    counts.record(entry.risk);
                }
                stats.risk_counts = counts;
            }
            Err(e) => {
                tracing::warn!("No target suggestions available for {}: {}", user_id, e);
            }
        }
    }

    tracing::debug!(
        "Dashboard for {}: gpa={}, {} risks classified",
        user_id,
        stats.gpa,
        stats.risks.len()
    );

    HttpResponse::Ok().json(DashboardResponse {
        user_id,
        stats,
        fetched_at: snapshot.fetched_at,
    })
}

#[cfg(test)]
mod tests {
    use crate::models::HealthResponse;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
