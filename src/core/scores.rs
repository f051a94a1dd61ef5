use crate::models::{SatSections, StandardizedScore, TestType, SECTION_MATH, SECTION_READING_WRITING};

/// Best (maximum) score recorded for a test type, or `None` when the user
/// has no scores of that type. Ties are irrelevant; only the value matters.
pub fn best_score(scores: &[StandardizedScore], test_type: TestType) -> Option<f64> {
    scores
        .iter()
        .filter(|score| score.test_type == test_type)
        .map(|score| score.score)
        .fold(None, |best, score| match best {
            Some(current) if current >= score => Some(current),
            _ => Some(score),
        })
}

/// Extract SAT math and reading/writing sub-scores.
///
/// Reads the highest-composite SAT record that actually carries section
/// scores (keys are already canonical after ingestion); earlier records win
/// ties. Users without any sectioned SAT record get empty sections.
pub fn sat_section_scores(scores: &[StandardizedScore]) -> SatSections {
    let sectioned = scores
        .iter()
        .filter(|score| score.test_type == TestType::Sat)
        .filter(|score| score.section_scores.as_ref().is_some_and(|map| !map.is_empty()))
        .fold(None::<&StandardizedScore>, |best, score| match best {
            Some(current) if current.score >= score.score => Some(current),
            _ => Some(score),
        });

    match sectioned.and_then(|score| score.section_scores.as_ref()) {
        Some(sections) => SatSections {
            math: sections.get(SECTION_MATH).copied(),
            reading_writing: sections.get(SECTION_READING_WRITING).copied(),
        },
        None => SatSections::default(),
    }
}
