//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradebook.toml
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_CONFIG)?;
        println!("Created gradebook.toml");
    }

    // Create example roster
    std::fs::create_dir_all("rosters")?;
    let example_path = std::path::Path::new("rosters/example.toml");
    if example_path.exists() {
        println!("rosters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ROSTER)?;
        println!("Created rosters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: gradebook validate --roster rosters/example.toml");
    println!("  2. Run: gradebook report --roster rosters/example.toml --course MAT101");
    println!("  3. Run: gradebook shell --roster rosters/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradebook configuration

# Students strictly below this average (percent) show up in reports.
low_performer_threshold = 60.0

# Weight used by the menu when the weight prompt is left blank.
default_weight = 1.0

# Roster preloaded by `gradebook shell` and `gradebook report`.
roster = "rosters/example.toml"
"#;

const EXAMPLE_ROSTER: &str = r#"[[professors]]
id = "p1"
name = "Ada Lovelace"
email = "ada@uni.edu"
department = "Mathematics"

[[students]]
id = "s1"
name = "Bo Chen"
email = "bo@uni.edu"
student_number = "2024-001"

[[students]]
id = "s2"
name = "Cy Diaz"
email = "cy@uni.edu"
student_number = "2024-002"

[[courses]]
code = "MAT101"
name = "Calculus I"
professor = "p1"
students = ["s1", "s2"]

[[courses.evaluations]]
kind = "assignment"
title = "Problem set 1"
max_score = 10.0
weight = 1.0
scores = { s1 = 5.0, s2 = 9.0 }

[[courses.evaluations]]
kind = "exam"
title = "Midterm"
max_score = 50.0
weight = 3.0
scores = { s1 = 40.0 }
"#;
