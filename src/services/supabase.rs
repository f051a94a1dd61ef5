use crate::models::{
    Achievement, Course, CourseChanges, Extracurricular, NewAchievement, NewCourse,
    NewExtracurricular, NewScore, NewTarget, ProfileChanges, Recommendation, StandardizedScore,
    StudentProfile, TargetWithUniversity, UserTarget,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when talking to the Supabase REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub profiles: String,
    pub courses: String,
    pub scores: String,
    pub targets: String,
    pub recommendations: String,
    pub extracurriculars: String,
    pub achievements: String,
}

/// Supabase (PostgREST) client
///
/// Handles all user-scoped row access against the hosted backend:
/// - Fetching the portfolio collections (courses, scores, targets, ...)
/// - Creating, updating and deleting rows on behalf of the web client
///
/// Row-level security is enforced server-side; this client authenticates
/// with the service key and scopes every query by `user_id` explicitly.
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    pub fn new(base_url: String, service_key: String, tables: SupabaseTables) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
            tables,
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", &self.service_key))
    }

    async fn check(response: reqwest::Response, context: &str) -> Result<reqwest::Response, SupabaseError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SupabaseError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("{} failed: {} - {}", context, status, body);
                Err(SupabaseError::ApiError(format!("{}: {}", context, status)))
            }
        }
    }

    /// Fetch all rows matching a PostgREST query string
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, SupabaseError> {
        let url = format!("{}?{}", self.endpoint(table), query);
        tracing::debug!("Fetching rows from: {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        let response = Self::check(response, table).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {} rows: {}", table, e)))
    }

    /// Insert one row and return the written representation
    async fn insert_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, SupabaseError> {
        let response = self
            .request(Method::POST, &self.endpoint(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let response = Self::check(response, table).await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {} insert: {}", table, e)))?;

        if rows.is_empty() {
            return Err(SupabaseError::InvalidResponse(format!(
                "Insert into {} returned no representation",
                table
            )));
        }
        Ok(rows.remove(0))
    }

    /// Patch one row by id and return the written representation
    async fn update_row<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: Uuid,
        changes: &B,
    ) -> Result<T, SupabaseError> {
        let url = format!("{}?id=eq.{}", self.endpoint(table), id);
        let response = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;
        let response = Self::check(response, table).await?;

        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse {} update: {}", table, e)))?;

        if rows.is_empty() {
            return Err(SupabaseError::NotFound(format!("{} row {}", table, id)));
        }
        Ok(rows.remove(0))
    }

    /// Delete one row by id; returns whether a row actually matched
    async fn delete_row(&self, table: &str, id: Uuid) -> Result<bool, SupabaseError> {
        let url = format!("{}?id=eq.{}", self.endpoint(table), id);
        let response = self
            .request(Method::DELETE, &url)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let response = Self::check(response, table).await?;

        let rows: Vec<serde_json::Value> = response.json().await.unwrap_or_default();
        Ok(!rows.is_empty())
    }

    /// Fetch a user's profile row, `None` when onboarding hasn't created one
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>, SupabaseError> {
        let query = format!("id=eq.{}&select=*", user_id);
        let mut rows: Vec<StudentProfile> = self.fetch_rows(&self.tables.profiles, &query).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges,
    ) -> Result<StudentProfile, SupabaseError> {
        self.update_row(&self.tables.profiles, user_id, changes)
            .await
    }

    /// All of a user's courses, newest school year first
    pub async fn list_courses(&self, user_id: Uuid) -> Result<Vec<Course>, SupabaseError> {
        let query = format!(
            "user_id=eq.{}&select=*&order=year.desc,semester.desc",
            user_id
        );
        self.fetch_rows(&self.tables.courses, &query).await
    }

    pub async fn create_course(&self, row: &NewCourse) -> Result<Course, SupabaseError> {
        self.insert_row(&self.tables.courses, row).await
    }

    pub async fn update_course(
        &self,
        id: Uuid,
        changes: &CourseChanges,
    ) -> Result<Course, SupabaseError> {
        self.update_row(&self.tables.courses, id, changes).await
    }

    pub async fn delete_course(&self, id: Uuid) -> Result<bool, SupabaseError> {
        self.delete_row(&self.tables.courses, id).await
    }

    /// A user's full test-score history, most recent sitting first
    pub async fn list_scores(&self, user_id: Uuid) -> Result<Vec<StandardizedScore>, SupabaseError> {
        let query = format!(
            "user_id=eq.{}&select=*&order=date_taken.desc.nullslast",
            user_id
        );
        self.fetch_rows(&self.tables.scores, &query).await
    }

    pub async fn create_score(&self, row: &NewScore) -> Result<StandardizedScore, SupabaseError> {
        self.insert_row(&self.tables.scores, row).await
    }

    pub async fn delete_score(&self, id: Uuid) -> Result<bool, SupabaseError> {
        self.delete_row(&self.tables.scores, id).await
    }

    /// A user's targets with their university rows embedded
    pub async fn list_targets(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TargetWithUniversity>, SupabaseError> {
        // The embedded select carries characters that are reserved in URLs
        let select = urlencoding::encode("*,universities(*)");
        let query = format!("user_id=eq.{}&select={}", user_id, select);
        self.fetch_rows(&self.tables.targets, &query).await
    }

    /// Existing target rows for one (user, university) pair; used to reject duplicates
    pub async fn targets_for_university(
        &self,
        user_id: Uuid,
        university_id: Uuid,
    ) -> Result<Vec<UserTarget>, SupabaseError> {
        let query = format!(
            "user_id=eq.{}&university_id=eq.{}&select=*",
            user_id, university_id
        );
        self.fetch_rows(&self.tables.targets, &query).await
    }

    pub async fn create_target(&self, row: &NewTarget) -> Result<UserTarget, SupabaseError> {
        self.insert_row(&self.tables.targets, row).await
    }

    pub async fn delete_target(&self, id: Uuid) -> Result<bool, SupabaseError> {
        self.delete_row(&self.tables.targets, id).await
    }

    pub async fn list_recommendations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Recommendation>, SupabaseError> {
        let query = format!("user_id=eq.{}&select=*&order=created_at.desc", user_id);
        self.fetch_rows(&self.tables.recommendations, &query).await
    }

    pub async fn list_extracurriculars(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Extracurricular>, SupabaseError> {
        let query = format!("user_id=eq.{}&select=*", user_id);
        self.fetch_rows(&self.tables.extracurriculars, &query).await
    }

    pub async fn create_extracurricular(
        &self,
        row: &NewExtracurricular,
    ) -> Result<Extracurricular, SupabaseError> {
        self.insert_row(&self.tables.extracurriculars, row).await
    }

    pub async fn delete_extracurricular(&self, id: Uuid) -> Result<bool, SupabaseError> {
        self.delete_row(&self.tables.extracurriculars, id).await
    }

    pub async fn list_achievements(&self, user_id: Uuid) -> Result<Vec<Achievement>, SupabaseError> {
        let query = format!("user_id=eq.{}&select=*", user_id);
        self.fetch_rows(&self.tables.achievements, &query).await
    }

    pub async fn create_achievement(
        &self,
        row: &NewAchievement,
    ) -> Result<Achievement, SupabaseError> {
        self.insert_row(&self.tables.achievements, row).await
    }

    pub async fn delete_achievement(&self, id: Uuid) -> Result<bool, SupabaseError> {
        self.delete_row(&self.tables.achievements, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SupabaseTables {
        SupabaseTables {
            profiles: "users".to_string(),
            courses: "courses".to_string(),
            scores: "standardized_scores".to_string(),
            targets: "user_targets".to_string(),
            recommendations: "recommendations_ai".to_string(),
            extracurriculars: "extracurriculars".to_string(),
            achievements: "achievements".to_string(),
        }
    }

    #[test]
    fn test_endpoint_building() {
        let client = SupabaseClient::new(
            "https://project.supabase.co/".to_string(),
            "service_key".to_string(),
            tables(),
        );

        assert_eq!(
            client.endpoint("courses"),
            "https://project.supabase.co/rest/v1/courses"
        );
    }
}
