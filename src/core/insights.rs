use crate::core::gpa::{calculate_gpa, round2};
use crate::models::{Course, GradeLift};

/// Fixed what-if bump applied to the lowest course grade
const GRADE_BUMP: f64 = 5.0;
const MAX_GRADE: f64 = 100.0;

/// Simulate raising the single lowest course grade by [`GRADE_BUMP`] points
/// (capped at 100) and report the projected GPA alongside the delta versus
/// the GPA computed from the courses as given.
///
/// Read-only: the simulation recomputes over a substituted copy and never
/// touches the input. When several courses share the lowest grade the first
/// in the given ordering is picked, so the result is deterministic for a
/// fixed input order. Returns `None` when there are no courses to improve.
pub fn simulate_improvement(courses: &[Course]) -> Option<GradeLift> {
    let (lowest_idx, lowest) = courses
        .iter()
        .enumerate()
        .fold(None::<(usize, &Course)>, |acc, (idx, course)| match acc {
            Some((_, current)) if current.grade <= course.grade => acc,
            _ => Some((idx, course)),
        })?;

    let bumped = (lowest.grade + GRADE_BUMP).min(MAX_GRADE);

    let adjusted: Vec<Course> = courses
        .iter()
        .enumerate()
        .map(|(idx, course)| {
            let mut course = course.clone();
            if idx == lowest_idx {
                course.grade = bumped;
            }
            course
        })
        .collect();

    let current_gpa = calculate_gpa(courses);
    let projected_gpa = calculate_gpa(&adjusted);

    Some(GradeLift {
        course_name: lowest.name.clone(),
        from: lowest.grade,
        to: bumped,
        projected_gpa,
        delta: round2(projected_gpa - current_gpa),
    })
}
