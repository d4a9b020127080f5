//! The `gradebook list` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;

/// What to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Professors,
    Students,
    Courses,
}

pub fn execute(roster: PathBuf, kind: ListKind) -> Result<()> {
    let registry = super::load_registry(Some(&roster))?;

    match kind {
        ListKind::Professors => {
            let professors = registry.list_professors();
            if professors.is_empty() {
                println!("No professors registered.");
            }
            for p in professors {
                let department = p
                    .as_professor()
                    .map(|prof| prof.department.as_str())
                    .unwrap_or_default();
                println!("{}  {}  <{}>  {}", p.id, p.name, p.email, department);
            }
        }
        ListKind::Students => {
            let students = registry.list_students();
            if students.is_empty() {
                println!("No students registered.");
            }
            for s in students {
                let Some(profile) = s.as_student() else {
                    continue;
                };
                println!(
                    "{}  {}  <{}>  #{}  courses: {}",
                    s.id,
                    s.name,
                    s.email,
                    profile.student_number,
                    profile.courses().join(", ")
                );
            }
        }
        ListKind::Courses => {
            let courses = registry.list_courses();
            if courses.is_empty() {
                println!("No courses registered.");
            }
            for c in courses {
                let professor = registry.professor_of(c)?;
                println!(
                    "{}  {}  professor: {}  students: {}  evaluations: {}",
                    c.code(),
                    c.name(),
                    professor.name,
                    c.roster().len(),
                    c.evaluations().len()
                );
            }
        }
    }

    Ok(())
}
