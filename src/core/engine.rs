use crate::core::{
    gpa::calculate_gpa,
    insights::simulate_improvement,
    risk::calculate_admissions_risk,
    scores::{best_score, sat_section_scores},
};
use crate::models::{
    ActivityHours, DashboardStats, PortfolioSnapshot, RiskCounts, RiskThresholds, RiskTier,
    TestType, University, UniversityRisk,
};

/// Stats orchestrator - derives every dashboard figure from one snapshot
///
/// Stateless apart from the classifier thresholds it carries; safe to clone
/// into handlers and call from any context. All derivation is synchronous
/// and pure over the snapshot passed in.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    thresholds: RiskThresholds,
}

impl StatsEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_default_thresholds() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
        }
    }

    /// Classify a single university against a candidate's GPA and best SAT
    pub fn classify(&self, gpa: f64, sat: Option<f64>, university: &University) -> RiskTier {
        calculate_admissions_risk(gpa, sat, university, &self.thresholds)
    }

    /// Classify a list of universities, pairing each with its tier
    pub fn classify_all(
        &self,
        gpa: f64,
        sat: Option<f64>,
        universities: &[University],
    ) -> Vec<UniversityRisk> {
        universities
            .iter()
            .map(|university| UniversityRisk {
                university: university.clone(),
                risk: self.classify(gpa, sat, university),
            })
            .collect()
    }

    /// Derive the full dashboard statistics for one portfolio snapshot.
    ///
    /// The profile's preset `current_gpa` overrides the computed value
    /// entirely when present; the improvement simulation always works from
    /// the course data, keeping its projected delta non-negative.
    pub fn dashboard(&self, snapshot: &PortfolioSnapshot) -> DashboardStats {
        let gpa = self.effective_gpa(snapshot);
        let best_sat = best_score(&snapshot.scores, TestType::Sat);
        let best_act = best_score(&snapshot.scores, TestType::Act);

        let targets: Vec<University> = snapshot
            .targets
            .iter()
            .map(|target| target.university.clone())
            .collect();
        let risks = self.classify_all(gpa, best_sat, &targets);

        let mut risk_counts = RiskCounts::default();
        for entry in &risks {
            risk_counts.record(entry.risk);
        }

        DashboardStats {
            gpa,
            course_count: snapshot.courses.len(),
            best_sat,
            best_act,
            sat_sections: sat_section_scores(&snapshot.scores),
            risks,
            risk_counts,
            activity_hours: activity_hours(snapshot),
            improvement: simulate_improvement(&snapshot.courses),
        }
    }

    /// Profile override first, computed GPA otherwise
    pub fn effective_gpa(&self, snapshot: &PortfolioSnapshot) -> f64 {
        snapshot
            .profile
            .as_ref()
            .and_then(|profile| profile.current_gpa)
            .unwrap_or_else(|| calculate_gpa(&snapshot.courses))
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}

fn activity_hours(snapshot: &PortfolioSnapshot) -> ActivityHours {
    let total: f64 = snapshot
        .extracurriculars
        .iter()
        .map(|activity| activity.hours_per_week)
        .sum();
    let average = if snapshot.extracurriculars.is_empty() {
        0.0
    } else {
        total / snapshot.extracurriculars.len() as f64
    };

    ActivityHours { total, average }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Course, CourseTerm, Extracurricular, StandardizedScore, StudentProfile,
        TargetWithUniversity,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn course(grade: f64) -> Course {
        Course {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Course".to_string(),
            grade,
            year: 2025,
            semester: CourseTerm::Fall,
            created_at: None,
        }
    }

    fn sat(score: f64) -> StandardizedScore {
        StandardizedScore {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            test_type: TestType::Sat,
            score,
            section_scores: None,
            date_taken: None,
            created_at: None,
        }
    }

    fn target(avg_gpa: f64, avg_sat: f64, acceptance_rate: f64) -> TargetWithUniversity {
        TargetWithUniversity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            university_id: Uuid::new_v4(),
            reason_for_interest: None,
            university: University {
                id: Uuid::new_v4(),
                name: "Test University".to_string(),
                country: "USA".to_string(),
                image_url: None,
                avg_gpa,
                avg_sat,
                avg_act: 30.0,
                acceptance_rate,
                tuition: 40_000.0,
            },
        }
    }

    fn activity(hours_per_week: f64) -> Extracurricular {
        Extracurricular {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Club".to_string(),
            description: None,
            level: "School".to_string(),
            hours_per_week,
            years_participated: 1.0,
        }
    }

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            profile: None,
            courses: vec![],
            scores: vec![],
            targets: vec![],
            recommendations: vec![],
            extracurriculars: vec![],
            achievements: vec![],
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_dashboard_over_empty_snapshot() {
        let engine = StatsEngine::with_default_thresholds();
        let stats = engine.dashboard(&snapshot());

        assert_eq!(stats.gpa, 0.0);
        assert_eq!(stats.course_count, 0);
        assert_eq!(stats.best_sat, None);
        assert!(stats.risks.is_empty());
        assert!(stats.improvement.is_none());
    }

    #[test]
    fn test_profile_gpa_override_wins() {
        let engine = StatsEngine::with_default_thresholds();
        let mut snap = snapshot();
        snap.courses = vec![course(95.0)]; // would compute to 4.0
        snap.profile = Some(StudentProfile {
            id: Uuid::new_v4(),
            name: None,
            email: None,
            intended_major: None,
            current_gpa: Some(3.2),
        });

        let stats = engine.dashboard(&snap);
        assert_eq!(stats.gpa, 3.2);
        assert_eq!(stats.course_count, 1);
    }

    #[test]
    fn test_computed_gpa_when_no_override() {
        let engine = StatsEngine::with_default_thresholds();
        let mut snap = snapshot();
        snap.courses = vec![course(100.0), course(80.0)];

        assert_eq!(engine.dashboard(&snap).gpa, 3.35);
    }

    #[test]
    fn test_risks_and_counts_per_target() {
        let engine = StatsEngine::with_default_thresholds();
        let mut snap = snapshot();
        snap.courses = vec![course(96.0)];
        snap.scores = vec![sat(1550.0)];
        snap.targets = vec![
            target(3.5, 1400.0, 60.0), // safety
            target(3.9, 1530.0, 8.0),  // selective
        ];

        let stats = engine.dashboard(&snap);
        assert_eq!(stats.risks.len(), 2);
        assert_eq!(stats.risks[0].risk, RiskTier::Safety);
        assert_eq!(stats.risk_counts.safety, 1);
        assert_eq!(
            stats.risk_counts.safety
                + stats.risk_counts.target
                + stats.risk_counts.reach
                + stats.risk_counts.high_reach,
            2
        );
    }

    #[test]
    fn test_activity_hours_totals() {
        let engine = StatsEngine::with_default_thresholds();
        let mut snap = snapshot();
        snap.extracurriculars = vec![activity(4.0), activity(6.0)];

        let stats = engine.dashboard(&snap);
        assert_eq!(stats.activity_hours.total, 10.0);
        assert_eq!(stats.activity_hours.average, 5.0);
    }

    #[test]
    fn test_best_scores_feed_the_classifier() {
        let engine = StatsEngine::with_default_thresholds();
        let mut snap = snapshot();
        snap.courses = vec![course(94.0)];
        snap.scores = vec![sat(1300.0), sat(1500.0)];
        snap.targets = vec![target(3.6, 1440.0, 50.0)];

        let stats = engine.dashboard(&snap);
        assert_eq!(stats.best_sat, Some(1500.0));
        // GPA 4.0 >= 3.8 (+2), SAT 1500 >= 1490 (+2) -> Safety
        assert_eq!(stats.risks[0].risk, RiskTier::Safety);
    }
}
