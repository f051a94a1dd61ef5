// Integration tests for the Crest stats engine

use crest_stats::core::StatsEngine;
use crest_stats::models::{
    Course, CourseTerm, Extracurricular, PortfolioSnapshot, RiskTier, StandardizedScore,
    StudentProfile, TargetWithUniversity, TestType, University,
};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

fn course(name: &str, grade: f64, year: i32) -> Course {
    Course {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        grade,
        year,
        semester: CourseTerm::Fall,
        created_at: None,
    }
}

fn sat_score(value: f64, math: Option<f64>, reading_writing: Option<f64>) -> StandardizedScore {
    let mut sections = HashMap::new();
    if let Some(math) = math {
        sections.insert("math".to_string(), math);
    }
    if let Some(rw) = reading_writing {
        sections.insert("reading_writing".to_string(), rw);
    }

    StandardizedScore {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        test_type: TestType::Sat,
        score: value,
        section_scores: if sections.is_empty() { None } else { Some(sections) },
        date_taken: None,
        created_at: None,
    }
}

fn target(name: &str, avg_gpa: f64, avg_sat: f64, acceptance_rate: f64) -> TargetWithUniversity {
    TargetWithUniversity {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        university_id: Uuid::new_v4(),
        reason_for_interest: None,
        university: University {
            id: Uuid::new_v4(),
            name: name.to_string(),
            country: "USA".to_string(),
            image_url: None,
            avg_gpa,
            avg_sat,
            avg_act: 31.0,
            acceptance_rate,
            tuition: 52_000.0,
        },
    }
}

fn snapshot_for(
    courses: Vec<Course>,
    scores: Vec<StandardizedScore>,
    targets: Vec<TargetWithUniversity>,
) -> PortfolioSnapshot {
    PortfolioSnapshot {
        profile: None,
        courses,
        scores,
        targets,
        recommendations: vec![],
        extracurriculars: vec![],
        achievements: vec![],
        fetched_at: Utc::now(),
    }
}

#[test]
fn test_end_to_end_dashboard_derivation() {
    let engine = StatsEngine::with_default_thresholds();

    let snapshot = snapshot_for(
        vec![
            course("AP Calculus", 95.0, 2025),
            course("AP Physics", 91.0, 2025),
            course("Spanish III", 88.0, 2025),
            course("English Literature", 85.0, 2024),
            course("World History", 77.0, 2024),
        ],
        vec![
            sat_score(1380.0, Some(700.0), Some(680.0)),
            sat_score(1480.0, Some(760.0), Some(720.0)),
        ],
        vec![
            target("State University", 3.3, 1250.0, 60.0),
            target("Flagship College", 3.7, 1450.0, 25.0),
            target("Ivy Tower", 3.95, 1550.0, 4.0),
        ],
    );

    let stats = engine.dashboard(&snapshot);

    // 4.0 + 3.7 + 3.3 + 3.0 + 2.0 over 5 = 3.2
    assert_eq!(stats.gpa, 3.2);
    assert_eq!(stats.course_count, 5);
    assert_eq!(stats.best_sat, Some(1480.0));
    assert_eq!(stats.best_act, None);

    // Sections come from the best sectioned SAT sitting
    assert_eq!(stats.sat_sections.math, Some(760.0));
    assert_eq!(stats.sat_sections.reading_writing, Some(720.0));

    // One tier per target, counts consistent with the list
    assert_eq!(stats.risks.len(), 3);
    let counted = stats.risk_counts.safety
        + stats.risk_counts.target
        + stats.risk_counts.reach
        + stats.risk_counts.high_reach;
    assert_eq!(counted, 3);

    // The open-admission school must classify no worse than the Ivy
    let state_tier = stats.risks[0].risk;
    let ivy_tier = stats.risks[2].risk;
    assert!(state_tier <= ivy_tier);

    // Lowest course (World History, 77) drives the what-if insight
    let lift = stats.improvement.unwrap();
    assert_eq!(lift.course_name, "World History");
    assert_eq!(lift.to, 82.0);
    // 77 -> 2.0 becomes 82 -> 2.7: mean moves to 16.7 / 5 = 3.34
    assert_eq!(lift.projected_gpa, 3.34);
    assert_eq!(lift.delta, 0.14);
}

#[test]
fn test_dashboard_with_profile_override() {
    let engine = StatsEngine::with_default_thresholds();

    let mut snapshot = snapshot_for(
        vec![course("Remedial Math", 58.0, 2024)],
        vec![],
        vec![target("State University", 3.3, 1250.0, 60.0)],
    );
    snapshot.profile = Some(StudentProfile {
        id: Uuid::new_v4(),
        name: Some("Jamie".to_string()),
        email: None,
        intended_major: Some("Biology".to_string()),
        current_gpa: Some(3.6),
    });

    let stats = engine.dashboard(&snapshot);

    // Preset GPA wins over the computed 0.0
    assert_eq!(stats.gpa, 3.6);
    // And the classifier sees the override too: 3.6 >= 3.3 + 0.2 -> +2 -> Target
    assert_eq!(stats.risks[0].risk, RiskTier::Target);
}

#[test]
fn test_dashboard_risk_counts_by_tier() {
    let engine = StatsEngine::with_default_thresholds();

    let snapshot = snapshot_for(
        vec![course("Honors Chemistry", 94.0, 2025)],
        vec![sat_score(1500.0, None, None)],
        vec![
            target("Safety School", 3.2, 1200.0, 70.0),
            target("Another Safety", 3.4, 1300.0, 55.0),
            target("Selective Place", 3.9, 1520.0, 6.0),
        ],
    );

    let stats = engine.dashboard(&snapshot);
    assert_eq!(stats.risk_counts.safety, 2);
    assert_eq!(
        stats.risk_counts.safety + stats.risk_counts.target + stats.risk_counts.reach
            + stats.risk_counts.high_reach,
        3
    );
}

#[test]
fn test_dashboard_activity_hours() {
    let engine = StatsEngine::with_default_thresholds();

    let mut snapshot = snapshot_for(vec![], vec![], vec![]);
    snapshot.extracurriculars = vec![
        Extracurricular {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Debate Club".to_string(),
            description: None,
            level: "National".to_string(),
            hours_per_week: 6.0,
            years_participated: 3.0,
        },
        Extracurricular {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Volunteering".to_string(),
            description: None,
            level: "Community".to_string(),
            hours_per_week: 2.0,
            years_participated: 1.0,
        },
    ];

    let stats = engine.dashboard(&snapshot);
    assert_eq!(stats.activity_hours.total, 8.0);
    assert_eq!(stats.activity_hours.average, 4.0);
}

#[test]
fn test_dashboard_serializes_for_the_web_client() {
    let engine = StatsEngine::with_default_thresholds();

    let snapshot = snapshot_for(
        vec![course("Biology", 89.0, 2025)],
        vec![sat_score(1400.0, Some(720.0), Some(680.0))],
        vec![target("Ivy Tower", 3.95, 1550.0, 4.0)],
    );

    let stats = engine.dashboard(&snapshot);
    let json = serde_json::to_value(&stats).unwrap();

    assert!(json.get("courseCount").is_some());
    assert!(json.get("satSections").is_some());
    assert!(json["satSections"].get("readingWriting").is_some());
    assert!(json["riskCounts"].get("highReach").is_some());

    // Tier labels serialize with their display spelling
    let tier = json["risks"][0]["risk"].as_str().unwrap();
    assert!(matches!(tier, "Safety" | "Target" | "Reach" | "High Reach"));
}
