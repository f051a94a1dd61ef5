use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// Academic term a course was taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseTerm {
    Fall,
    Spring,
    Summer,
    Winter,
}

/// Standardized test families tracked per user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    #[serde(rename = "SAT")]
    Sat,
    #[serde(rename = "ACT")]
    Act,
    #[serde(rename = "AP")]
    Ap,
    #[serde(rename = "IB")]
    Ib,
    #[serde(rename = "TOEFL")]
    Toefl,
    #[serde(rename = "IELTS")]
    Ielts,
    #[serde(other)]
    Other,
}

/// A course row as stored in the backend (grades on a 0-100 scale)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub grade: f64,
    pub year: i32,
    pub semester: CourseTerm,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Canonical section identifiers used in `StandardizedScore::section_scores`
pub const SECTION_MATH: &str = "math";
pub const SECTION_READING_WRITING: &str = "reading_writing";

/// Normalize a section-score key into its canonical identifier.
///
/// Historical data carries several spellings for the SAT reading/writing
/// section ("reading_writing", "reading & writing", "readingWriting", "EBRW");
/// all of them collapse to [`SECTION_READING_WRITING`]. Unknown sections keep
/// a lowercased, underscore-separated form of their original key.
pub fn canonical_section_key(raw: &str) -> String {
    let squashed: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    match squashed.as_str() {
        "math" | "maths" | "mathematics" => SECTION_MATH.to_string(),
        "readingwriting" | "readingandwriting" | "ebrw" | "evidencebasedreadingandwriting" => {
            SECTION_READING_WRITING.to_string()
        }
        _ => {
            let mut key = String::with_capacity(raw.len());
            let mut last_sep = true;
            for c in raw.chars() {
                if c.is_ascii_alphanumeric() {
                    key.push(c.to_ascii_lowercase());
                    last_sep = false;
                } else if !last_sep {
                    key.push('_');
                    last_sep = true;
                }
            }
            key.trim_end_matches('_').to_string()
        }
    }
}

// Deserializes through a BTreeMap so two raw spellings collapsing to the same
// canonical key resolve deterministically (last in key order wins).
fn normalized_sections<'de, D>(deserializer: D) -> Result<Option<HashMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, f64>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|map| {
        map.into_iter()
            .map(|(key, value)| (canonical_section_key(&key), value))
            .collect()
    }))
}

/// A standardized test score; a user may hold many per test type (history)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizedScore {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_type: TestType,
    pub score: f64,
    #[serde(default, deserialize_with = "normalized_sections")]
    pub section_scores: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub date_taken: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// University reference data (read-only, globally shared)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub avg_gpa: f64,
    pub avg_sat: f64,
    pub avg_act: f64,
    pub acceptance_rate: f64,
    pub tuition: f64,
}

/// A user's target university association
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTarget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university_id: Uuid,
    #[serde(default)]
    pub reason_for_interest: Option<String>,
}

/// Target row joined with its university (PostgREST embeds under the table name)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetWithUniversity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub university_id: Uuid,
    #[serde(default)]
    pub reason_for_interest: Option<String>,
    #[serde(rename = "universities")]
    pub university: University,
}

/// Student profile; `current_gpa`, when set, overrides any computed GPA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub intended_major: Option<String>,
    #[serde(default)]
    pub current_gpa: Option<f64>,
}

/// Extracurricular activity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extracurricular {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub level: String,
    pub hours_per_week: f64,
    pub years_participated: f64,
}

/// Achievement / award record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub awarded_by: Option<String>,
    #[serde(default)]
    pub date_awarded: Option<NaiveDate>,
}

/// Stored advisory text (precomputed upstream; never generated here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source: String,
    pub recommendation: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Admissions difficulty tiers, ordered from easiest to hardest admit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Safety,
    Target,
    Reach,
    #[serde(rename = "High Reach")]
    HighReach,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskTier::Safety => "Safety",
            RiskTier::Target => "Target",
            RiskTier::Reach => "Reach",
            RiskTier::HighReach => "High Reach",
        };
        f.write_str(label)
    }
}

/// Margins used by the admissions-risk classifier
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub gpa_safety_margin: f64,
    pub gpa_target_margin: f64,
    pub sat_safety_margin: f64,
    pub sat_target_margin: f64,
    pub selectivity_cutoff: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            gpa_safety_margin: 0.2,
            gpa_target_margin: 0.1,
            sat_safety_margin: 50.0,
            sat_target_margin: 30.0,
            selectivity_cutoff: 15.0,
        }
    }
}

/// One user's aggregated portfolio, assembled by the aggregator and cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub profile: Option<StudentProfile>,
    pub courses: Vec<Course>,
    pub scores: Vec<StandardizedScore>,
    pub targets: Vec<TargetWithUniversity>,
    pub recommendations: Vec<Recommendation>,
    pub extracurriculars: Vec<Extracurricular>,
    pub achievements: Vec<Achievement>,
    pub fetched_at: DateTime<Utc>,
}

/// A university annotated with the candidate's classified risk tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniversityRisk {
    #[serde(flatten)]
    pub university: University,
    pub risk: RiskTier,
}

/// Count of targets per risk tier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskCounts {
    pub safety: usize,
    pub target: usize,
    pub reach: usize,
    #[serde(rename = "highReach")]
    pub high_reach: usize,
}

impl RiskCounts {
    pub fn record(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Safety => self.safety += 1,
            RiskTier::Target => self.target += 1,
            RiskTier::Reach => self.reach += 1,
            RiskTier::HighReach => self.high_reach += 1,
        }
    }
}

/// Weekly extracurricular load
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActivityHours {
    pub total: f64,
    pub average: f64,
}

/// SAT sub-section scores pulled from the section map
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SatSections {
    pub math: Option<f64>,
    #[serde(rename = "readingWriting")]
    pub reading_writing: Option<f64>,
}

/// What-if projection for bumping the single lowest course grade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeLift {
    #[serde(rename = "courseName")]
    pub course_name: String,
    pub from: f64,
    pub to: f64,
    #[serde(rename = "projectedGpa")]
    pub projected_gpa: f64,
    pub delta: f64,
}

/// Full set of derived dashboard statistics for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub gpa: f64,
    #[serde(rename = "courseCount")]
    pub course_count: usize,
    #[serde(rename = "bestSat")]
    pub best_sat: Option<f64>,
    #[serde(rename = "bestAct")]
    pub best_act: Option<f64>,
    #[serde(rename = "satSections")]
    pub sat_sections: SatSections,
    pub risks: Vec<UniversityRisk>,
    #[serde(rename = "riskCounts")]
    pub risk_counts: RiskCounts,
    #[serde(rename = "activityHours")]
    pub activity_hours: ActivityHours,
    pub improvement: Option<GradeLift>,
}

// Write models sent to the backend on create/update. Serialized snake_case to
// match the table columns; `None` fields are omitted from PATCH bodies.

#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub user_id: Uuid,
    pub name: String,
    pub grade: f64,
    pub year: i32,
    pub semester: CourseTerm,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<CourseTerm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewScore {
    pub user_id: Uuid,
    pub test_type: TestType,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_scores: Option<HashMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTarget {
    pub user_id: Uuid,
    pub university_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_interest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExtracurricular {
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub level: String,
    pub hours_per_week: f64,
    pub years_participated: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAchievement {
    pub user_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awarded_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_awarded: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended_major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_gpa: Option<f64>,
}
