use crate::models::{RiskThresholds, RiskTier, University};

/// Classify how hard a university admit is for a candidate.
///
/// Additive point score starting at 0:
/// - GPA at or above avg + safety margin earns +2, within the target margin
///   below avg earns +1, anything lower costs -2.
/// - The same scheme applies to the SAT when the candidate has one; a missing
///   SAT skips the step entirely (neither bonus nor penalty).
/// - Universities admitting fewer than the selectivity cutoff (default 15%)
///   cost a flat -2 regardless of academic standing.
///
/// An acceptance rate of zero or below is treated as unknown, not as
/// ultra-selective, so the penalty does not fire on missing reference data.
pub fn calculate_admissions_risk(
    gpa: f64,
    sat: Option<f64>,
    university: &University,
    thresholds: &RiskThresholds,
) -> RiskTier {
    let mut score: i32 = 0;

    // GPA standing
    if gpa >= university.avg_gpa + thresholds.gpa_safety_margin {
        score += 2;
    } else if gpa >= university.avg_gpa - thresholds.gpa_target_margin {
        score += 1;
    } else {
        score -= 2;
    }

    // SAT standing, only when the candidate has a score on record
    if let Some(sat) = sat {
        if sat >= university.avg_sat + thresholds.sat_safety_margin {
            score += 2;
        } else if sat >= university.avg_sat - thresholds.sat_target_margin {
            score += 1;
        } else {
            score -= 2;
        }
    }

    // Selectivity penalty for highly competitive admits
    if university.acceptance_rate > 0.0 && university.acceptance_rate < thresholds.selectivity_cutoff
    {
        score -= 2;
    }

    tier_for(score)
}

#[inline]
fn tier_for(score: i32) -> RiskTier {
    if score >= 3 {
        RiskTier::Safety
    } else if score >= 0 {
        RiskTier::Target
    } else if score >= -2 {
        RiskTier::Reach
    } else {
        RiskTier::HighReach
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn university(avg_gpa: f64, avg_sat: f64, acceptance_rate: f64) -> University {
        University {
            id: Uuid::new_v4(),
            name: "Test University".to_string(),
            country: "USA".to_string(),
            image_url: None,
            avg_gpa,
            avg_sat,
            avg_act: 30.0,
            acceptance_rate,
            tuition: 50_000.0,
        }
    }

    fn defaults() -> RiskThresholds {
        RiskThresholds::default()
    }

    #[test]
    fn test_strong_candidate_is_safety() {
        // +2 GPA, +2 SAT = 4
        let uni = university(3.5, 1400.0, 50.0);
        let tier = calculate_admissions_risk(4.0, Some(1600.0), &uni, &defaults());
        assert_eq!(tier, RiskTier::Safety);
    }

    #[test]
    fn test_weak_candidate_at_selective_school_is_high_reach() {
        // -2 GPA, no SAT, -2 selectivity = -4
        let uni = university(3.8, 1500.0, 5.0);
        let tier = calculate_admissions_risk(3.0, None, &uni, &defaults());
        assert_eq!(tier, RiskTier::HighReach);
    }

    #[test]
    fn test_missing_sat_skips_the_sat_step() {
        let uni = university(3.5, 1400.0, 50.0);
        // GPA alone: +2 -> Target; a low SAT would have dragged it to Target/Reach
        assert_eq!(
            calculate_admissions_risk(3.8, None, &uni, &defaults()),
            RiskTier::Target
        );
        assert_eq!(
            calculate_admissions_risk(3.8, Some(1200.0), &uni, &defaults()),
            RiskTier::Target
        );
    }

    #[test]
    fn test_gpa_margin_boundaries() {
        let uni = university(3.5, 1400.0, 50.0);
        let t = defaults();
        // Exactly avg + 0.2 earns the full bonus
        assert_eq!(calculate_admissions_risk(3.7, Some(1450.0), &uni, &t), RiskTier::Safety);
        // Exactly avg - 0.1 still earns the partial credit
        assert_eq!(calculate_admissions_risk(3.4, Some(1450.0), &uni, &t), RiskTier::Target);
        // Below the floor costs -2
        assert_eq!(calculate_admissions_risk(3.39, Some(1200.0), &uni, &t), RiskTier::HighReach);
    }

    #[test]
    fn test_selectivity_penalty_applies_unconditionally() {
        // Same strong candidate, only acceptance rate differs
        let open = university(3.5, 1400.0, 40.0);
        let selective = university(3.5, 1400.0, 10.0);
        let t = defaults();

        assert_eq!(calculate_admissions_risk(4.0, Some(1600.0), &open, &t), RiskTier::Safety);
        // 4 - 2 = 2 -> Target
        assert_eq!(
            calculate_admissions_risk(4.0, Some(1600.0), &selective, &t),
            RiskTier::Target
        );
    }

    #[test]
    fn test_zero_acceptance_rate_is_neutral() {
        let unknown = university(3.5, 1400.0, 0.0);
        let tier = calculate_admissions_risk(4.0, Some(1600.0), &unknown, &defaults());
        assert_eq!(tier, RiskTier::Safety);
    }

    #[test]
    fn test_monotonic_in_gpa() {
        let uni = university(3.6, 1450.0, 12.0);
        let t = defaults();
        let mut previous = RiskTier::HighReach;
        for step in 0..=40 {
            let gpa = step as f64 * 0.1;
            let tier = calculate_admissions_risk(gpa, Some(1400.0), &uni, &t);
            assert!(tier <= previous, "tier worsened as GPA rose: {} -> {}", previous, tier);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_score_boundaries() {
        assert_eq!(tier_for(3), RiskTier::Safety);
        assert_eq!(tier_for(2), RiskTier::Target);
        assert_eq!(tier_for(0), RiskTier::Target);
        assert_eq!(tier_for(-1), RiskTier::Reach);
        assert_eq!(tier_for(-2), RiskTier::Reach);
        assert_eq!(tier_for(-3), RiskTier::HighReach);
    }
}
