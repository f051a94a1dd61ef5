use crate::models::Course;

/// Map a 0-100 course grade onto 4.0-scale grade points.
///
/// The table is a fixed, non-linear step function with boundaries at
/// 60, 70, 80, 83, 87, 90 and 93. Grades above 100 saturate in the top
/// bucket rather than erroring; range validation happens upstream.
#[inline]
pub fn grade_points(grade: f64) -> f64 {
    if grade >= 93.0 {
        4.0
    } else if grade >= 90.0 {
        3.7
    } else if grade >= 87.0 {
        3.3
    } else if grade >= 83.0 {
        3.0
    } else if grade >= 80.0 {
        2.7
    } else if grade >= 70.0 {
        2.0
    } else if grade >= 60.0 {
        1.0
    } else {
        0.0
    }
}

/// Calculate the unweighted GPA (4.0 scale) for a set of courses.
///
/// Returns the arithmetic mean of the mapped grade points, rounded to two
/// decimals (half away from zero). An empty course set yields exactly 0.0
/// as a "no data" sentinel; callers distinguish that from all-failing
/// grades via the course count, never via the GPA value itself.
pub fn calculate_gpa(courses: &[Course]) -> f64 {
    if courses.is_empty() {
        return 0.0;
    }

    let total: f64 = courses.iter().map(|course| grade_points(course.grade)).sum();

    round2(total / courses.len() as f64)
}

/// Round to two decimal places, half away from zero
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
