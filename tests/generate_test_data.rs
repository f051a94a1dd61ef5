/// Test data generator for the Crest stats service
///
/// Generates CSV files containing a university catalog plus sample courses
/// and test scores that can be imported via the Supabase dashboard.
///
/// Run: cargo run --bin generate-test-data

use std::fs::File;
use std::io::{BufWriter, Write};

const TEST_USER_ID: &str = "00000000-0000-4000-8000-0000000000aa";

const UNIVERSITIES: &[(&str, &str, f64, f64, f64, f64, f64)] = &[
    // name, country, avg_gpa, avg_sat, avg_act, acceptance_rate, tuition
    ("Harvard University", "USA", 3.94, 1550.0, 35.0, 4.0, 57261.0),
    ("Stanford University", "USA", 3.95, 1540.0, 34.0, 4.3, 56169.0),
    ("Massachusetts Institute of Technology", "USA", 3.96, 1560.0, 35.0, 4.1, 55878.0),
    ("University of Michigan", "USA", 3.88, 1435.0, 33.0, 20.2, 52266.0),
    ("Ohio State University", "USA", 3.76, 1355.0, 30.0, 57.2, 35019.0),
    ("Arizona State University", "USA", 3.54, 1245.0, 26.0, 88.4, 29438.0),
    ("University of Toronto", "Canada", 3.8, 1330.0, 29.0, 43.0, 45690.0),
    ("McGill University", "Canada", 3.82, 1340.0, 30.0, 46.3, 33514.0),
    ("University of Oxford", "UK", 3.9, 1470.0, 33.0, 17.5, 39010.0),
    ("University of Edinburgh", "UK", 3.75, 1380.0, 31.0, 40.0, 30474.0),
    ("ETH Zurich", "Switzerland", 3.85, 1420.0, 32.0, 27.0, 1660.0),
    ("Technical University of Munich", "Germany", 3.7, 1360.0, 30.0, 8.0, 304.0),
];

const COURSE_NAMES: &[&str] = &[
    "AP Calculus AB", "AP Calculus BC", "AP Physics", "AP Chemistry", "AP Biology",
    "AP Computer Science", "English Literature", "World History", "US History",
    "Spanish III", "French II", "Statistics", "Economics", "Psychology",
    "Environmental Science", "Linear Algebra", "Creative Writing", "Art History",
];

const SEMESTERS: &[&str] = &["Fall", "Spring", "Summer", "Winter"];

// Simple random number generator using system time
fn get_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos() as u64
}

fn rand_range(min: f64, max: f64) -> f64 {
    let seed = get_seed();
    let normalized = (seed as f64) / (u64::MAX as f64);
    min + normalized * (max - min)
}

fn rand_int(max: usize) -> usize {
    (get_seed() % max as u64) as usize
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_universities(path: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "name,country,avg_gpa,avg_sat,avg_act,acceptance_rate,tuition"
    )?;

    for (name, country, avg_gpa, avg_sat, avg_act, acceptance_rate, tuition) in UNIVERSITIES {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            csv_escape(name),
            country,
            avg_gpa,
            avg_sat,
            avg_act,
            acceptance_rate,
            tuition
        )?;
    }

    writer.flush()
}

fn write_courses(path: &str, count: usize) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "user_id,name,grade,year,semester")?;

    for i in 0..count {
        let name = COURSE_NAMES[rand_int(COURSE_NAMES.len())];
        let grade = (rand_range(55.0, 100.0) * 10.0).round() / 10.0;
        let year = 2021 + (i % 5);
        let semester = SEMESTERS[rand_int(SEMESTERS.len())];

        writeln!(
            writer,
            "{},{},{},{},{}",
            TEST_USER_ID,
            csv_escape(name),
            grade,
            year,
            semester
        )?;
    }

    writer.flush()
}

fn write_scores(path: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "user_id,test_type,score,section_scores,date_taken")?;

    // A short SAT history plus one ACT sitting
    for (attempt, date) in ["2024-03-09", "2024-10-05"].iter().enumerate() {
        let math = 650 + rand_int(150) + attempt * 20;
        let reading_writing = 620 + rand_int(150) + attempt * 20;
        let composite = math + reading_writing;

        writeln!(
            writer,
            "{},SAT,{},{},{}",
            TEST_USER_ID,
            composite,
            csv_escape(&format!(
                r#"{{"math": {}, "reading_writing": {}}}"#,
                math, reading_writing
            )),
            date
        )?;
    }

    let act = 24 + rand_int(12);
    writeln!(writer, "{},ACT,{},,2024-06-08", TEST_USER_ID, act)?;

    writer.flush()
}

fn main() -> std::io::Result<()> {
    println!("Generating test data CSVs for Supabase import...");

    write_universities("universities.csv")?;
    println!("  universities.csv ({} rows)", UNIVERSITIES.len());

    write_courses("courses.csv", 14)?;
    println!("  courses.csv (14 rows)");

    write_scores("standardized_scores.csv")?;
    println!("  standardized_scores.csv (3 rows)");

    println!("Done. Import each file into its table via the Supabase dashboard.");
    Ok(())
}
