use crate::models::University;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading the university catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Read-only access to the global university reference table
///
/// The catalog lives in the same Postgres database the hosted backend
/// serves, but unlike the user-scoped tables it carries no row-level
/// security, so the service reads it over a direct connection pool.
/// The schema is owned by the backend; expected column types are uuid,
/// text and double precision. Missing statistics come back as 0.
pub struct UniversityCatalog {
    pool: PgPool,
}

impl UniversityCatalog {
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, CatalogError> {
        Self::new(url, max_connections.unwrap_or(10), min_connections.unwrap_or(1)).await
    }

    /// All universities, alphabetical
    pub async fn list_all(&self) -> Result<Vec<University>, CatalogError> {
        let query = r#"
            SELECT id, name, country, image_url, avg_gpa, avg_sat, avg_act,
                   acceptance_rate, tuition
            FROM universities
            ORDER BY name ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_university).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<University>, CatalogError> {
        let query = r#"
            SELECT id, name, country, image_url, avg_gpa, avg_sat, avg_act,
                   acceptance_rate, tuition
            FROM universities
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(map_university))
    }

    /// Case-insensitive name search
    pub async fn search(&self, name_fragment: &str) -> Result<Vec<University>, CatalogError> {
        let query = r#"
            SELECT id, name, country, image_url, avg_gpa, avg_sat, avg_act,
                   acceptance_rate, tuition
            FROM universities
            WHERE name ILIKE $1
            ORDER BY name ASC
        "#;

        let pattern = format!("%{}%", name_fragment);
        let rows = sqlx::query(query).bind(pattern).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_university).collect())
    }

    pub async fn by_country(&self, country: &str) -> Result<Vec<University>, CatalogError> {
        let query = r#"
            SELECT id, name, country, image_url, avg_gpa, avg_sat, avg_act,
                   acceptance_rate, tuition
            FROM universities
            WHERE country = $1
            ORDER BY name ASC
        "#;

        let rows = sqlx::query(query).bind(country).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_university).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn map_university(row: &PgRow) -> University {
    University {
        id: row.get("id"),
        name: row.get("name"),
        country: row.get("country"),
        image_url: row.get("image_url"),
        avg_gpa: row.get::<Option<f64>, _>("avg_gpa").unwrap_or(0.0),
        avg_sat: row.get::<Option<f64>, _>("avg_sat").unwrap_or(0.0),
        avg_act: row.get::<Option<f64>, _>("avg_act").unwrap_or(0.0),
        acceptance_rate: row.get::<Option<f64>, _>("acceptance_rate").unwrap_or(0.0),
        tuition: row.get::<Option<f64>, _>("tuition").unwrap_or(0.0),
    }
}
