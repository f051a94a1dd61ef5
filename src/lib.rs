//! Crest Stats - portfolio statistics service for the Crest college planning app
//!
//! This library provides the GPA and admissions-risk scoring engine used by
//! the Crest web client, together with the aggregation layer that assembles
//! a user's academic portfolio from the hosted backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{StatsEngine, calculate_admissions_risk, calculate_gpa, grade_points, best_score, simulate_improvement};
pub use crate::models::{Course, DashboardStats, PortfolioSnapshot, RiskThresholds, RiskTier, StandardizedScore, TestType, University};
