mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::StatsEngine;
use crate::models::RiskThresholds;
use crate::routes::AppState;
use crate::services::{
    CacheManager, PortfolioService, SupabaseClient, SupabaseTables, TokenVerifier,
    UniversityCatalog,
};
use std::sync::Arc;
use tracing::info;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Crest stats service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize Supabase client
    let tables = SupabaseTables {
        profiles: settings.tables.profiles,
        courses: settings.tables.courses,
        scores: settings.tables.scores,
        targets: settings.tables.targets,
        recommendations: settings.tables.recommendations,
        extracurriculars: settings.tables.extracurriculars,
        achievements: settings.tables.achievements,
    };

    let supabase = Arc::new(SupabaseClient::new(
        settings.supabase.url,
        settings.supabase.service_key,
        tables,
    ));

    info!("Supabase client initialized");

    // Bearer-token resolution only works with the project JWT secret configured
    let verifier = settings.supabase.jwt_secret.as_deref().map(TokenVerifier::new);
    if verifier.is_none() {
        info!("No JWT secret configured; requests must carry an explicit userId");
    }

    // Initialize cache manager
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(&settings.cache.redis_url, l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            Arc::new(c)
        }
        Err(e) => {
            tracing::error!("Failed to connect to Redis ({}), cannot start without cache", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "Redis connection required"));
        }
    };

    // Initialize university catalog
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let catalog = Arc::new(
        UniversityCatalog::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to connect to the catalog database: {}", e);
            panic!("Catalog database connection error: {}", e);
        }),
    );

    info!("University catalog initialized (max: {} connections)", db_max_conn);

    // Initialize the scoring engine with configured thresholds
    let thresholds = RiskThresholds {
        gpa_safety_margin: settings.scoring.thresholds.gpa_safety_margin,
        gpa_target_margin: settings.scoring.thresholds.gpa_target_margin,
        sat_safety_margin: settings.scoring.thresholds.sat_safety_margin,
        sat_target_margin: settings.scoring.thresholds.sat_target_margin,
        selectivity_cutoff: settings.scoring.thresholds.selectivity_cutoff,
    };

    let engine = StatsEngine::new(thresholds);

    info!("Stats engine initialized with thresholds: {:?}", thresholds);

    let portfolio = Arc::new(PortfolioService::new(supabase.clone(), Some(cache.clone())));

    // Build application state
    let app_state = AppState {
        supabase,
        cache,
        catalog,
        portfolio,
        engine,
        verifier,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
