use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: String,
    /// Project JWT secret; bearer-token resolution is disabled when absent
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

/// Table names in the Supabase project; defaults match the web app's schema
#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
    #[serde(default = "default_courses_table")]
    pub courses: String,
    #[serde(default = "default_scores_table")]
    pub scores: String,
    #[serde(default = "default_targets_table")]
    pub targets: String,
    #[serde(default = "default_recommendations_table")]
    pub recommendations: String,
    #[serde(default = "default_extracurriculars_table")]
    pub extracurriculars: String,
    #[serde(default = "default_achievements_table")]
    pub achievements: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            profiles: default_profiles_table(),
            courses: default_courses_table(),
            scores: default_scores_table(),
            targets: default_targets_table(),
            recommendations: default_recommendations_table(),
            extracurriculars: default_extracurriculars_table(),
            achievements: default_achievements_table(),
        }
    }
}

fn default_profiles_table() -> String { "users".to_string() }
fn default_courses_table() -> String { "courses".to_string() }
fn default_scores_table() -> String { "standardized_scores".to_string() }
fn default_targets_table() -> String { "user_targets".to_string() }
fn default_recommendations_table() -> String { "recommendations_ai".to_string() }
fn default_extracurriculars_table() -> String { "extracurriculars".to_string() }
fn default_achievements_table() -> String { "achievements".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

/// Classifier margins for the admissions-risk scoring
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_gpa_safety_margin")]
    pub gpa_safety_margin: f64,
    #[serde(default = "default_gpa_target_margin")]
    pub gpa_target_margin: f64,
    #[serde(default = "default_sat_safety_margin")]
    pub sat_safety_margin: f64,
    #[serde(default = "default_sat_target_margin")]
    pub sat_target_margin: f64,
    #[serde(default = "default_selectivity_cutoff")]
    pub selectivity_cutoff: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            gpa_safety_margin: default_gpa_safety_margin(),
            gpa_target_margin: default_gpa_target_margin(),
            sat_safety_margin: default_sat_safety_margin(),
            sat_target_margin: default_sat_target_margin(),
            selectivity_cutoff: default_selectivity_cutoff(),
        }
    }
}

fn default_gpa_safety_margin() -> f64 { 0.2 }
fn default_gpa_target_margin() -> f64 { 0.1 }
fn default_sat_safety_margin() -> f64 { 50.0 }
fn default_sat_target_margin() -> f64 { 30.0 }
fn default_selectivity_cutoff() -> f64 { 15.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with CREST_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., CREST_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CREST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CREST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Fold the conventional deployment env vars into the config tree.
/// DATABASE_URL and the SUPABASE_* names are what hosting dashboards hand
/// out, so both those and the CREST__-prefixed forms are honored.
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("CREST_DATABASE__URL"))
        .ok();

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("CREST_SUPABASE__URL"))
        .ok();
    let service_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
        .or_else(|_| env::var("CREST_SUPABASE__SERVICE_KEY"))
        .ok();
    let jwt_secret = env::var("SUPABASE_JWT_SECRET")
        .or_else(|_| env::var("CREST_SUPABASE__JWT_SECRET"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = database_url {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = service_key {
        builder = builder.set_override("supabase.service_key", key)?;
    }
    if let Some(secret) = jwt_secret {
        builder = builder.set_override("supabase.jwt_secret", secret)?;
    }

    builder.build()
}
