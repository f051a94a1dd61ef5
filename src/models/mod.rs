// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    canonical_section_key, Achievement, ActivityHours, Course, CourseChanges, CourseTerm,
    DashboardStats, Extracurricular, GradeLift, NewAchievement, NewCourse, NewExtracurricular,
    NewScore, NewTarget, PortfolioSnapshot, ProfileChanges, Recommendation, RiskCounts,
    RiskThresholds, RiskTier, SatSections, StandardizedScore, StudentProfile,
    TargetWithUniversity, TestType, University, UniversityRisk, UserTarget, SECTION_MATH,
    SECTION_READING_WRITING,
};
pub use requests::{
    CreateAchievementRequest, CreateActivityRequest, CreateCourseRequest, CreateScoreRequest,
    CreateTargetRequest, UniversityQuery, UpdateCourseRequest, UpdateProfileRequest, UserQuery,
};
pub use responses::{
    DashboardResponse, DeletedResponse, ErrorResponse, HealthResponse, PortfolioResponse,
};
