use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CourseTerm, TestType};

/// Identifies the acting user on GET/DELETE endpoints; optional because a
/// Supabase bearer token, when present, takes precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
}

/// Filters for the university catalog listing
#[derive(Debug, Clone, Deserialize)]
pub struct UniversityQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub grade: f64,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    pub semester: CourseTerm,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub grade: Option<f64>,
    #[validate(range(min = 1900, max = 2100))]
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub semester: Option<CourseTerm>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateScoreRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[serde(alias = "test_type", rename = "testType")]
    pub test_type: TestType,
    #[validate(range(min = 0.0))]
    pub score: f64,
    #[serde(alias = "section_scores", rename = "sectionScores", default)]
    pub section_scores: Option<HashMap<String, f64>>,
    #[serde(alias = "date_taken", rename = "dateTaken", default)]
    pub date_taken: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTargetRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[serde(alias = "university_id", rename = "universityId")]
    pub university_id: Uuid,
    #[validate(length(max = 1000))]
    #[serde(alias = "reason_for_interest", rename = "reasonForInterest", default)]
    pub reason_for_interest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub level: String,
    #[validate(range(min = 0.0, max = 168.0))]
    #[serde(alias = "hours_per_week", rename = "hoursPerWeek")]
    pub hours_per_week: f64,
    #[validate(range(min = 0.0, max = 20.0))]
    #[serde(alias = "years_participated", rename = "yearsParticipated")]
    pub years_participated: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAchievementRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(alias = "awarded_by", rename = "awardedBy", default)]
    pub awarded_by: Option<String>,
    #[serde(alias = "date_awarded", rename = "dateAwarded", default)]
    pub date_awarded: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    #[serde(alias = "intended_major", rename = "intendedMajor", default)]
    pub intended_major: Option<String>,
    #[validate(range(min = 0.0, max = 4.0))]
    #[serde(alias = "current_gpa", rename = "currentGpa", default)]
    pub current_gpa: Option<f64>,
}
