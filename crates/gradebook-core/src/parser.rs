//! TOML roster parser.
//!
//! Loads roster files (professors, students, courses, evaluations and scores),
//! validates them, and replays them into a [`Registry`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::evaluation::DEFAULT_WEIGHT;
use crate::model::User;
use crate::registry::Registry;

/// A parsed roster file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub professors: Vec<ProfessorEntry>,
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfessorEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentEntry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseEntry {
    pub code: String,
    pub name: String,
    /// Id of the owning professor.
    pub professor: String,
    /// Ids of enrolled students, in enrollment order.
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default)]
    pub evaluations: Vec<EvaluationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationEntry {
    #[serde(default = "default_kind")]
    pub kind: String,
    pub title: String,
    pub max_score: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Raw scores keyed by student id.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

fn default_kind() -> String {
    "generic".to_string()
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Parse a single TOML roster file.
pub fn parse_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, path)
}

/// Parse a TOML string into a `Roster` (useful for testing).
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<Roster> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Recursively load all `.toml` roster files from a directory, in path order.
pub fn load_roster_directory(dir: &Path) -> Result<Vec<Roster>> {
    let mut rosters = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    // Later rosters may reference users and courses from earlier ones.
    paths.sort();

    for path in paths {
        if path.is_dir() {
            rosters.extend(load_roster_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_roster(&path) {
                Ok(roster) => rosters.push(roster),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(rosters)
}

impl Roster {
    /// Replays the roster into `registry`: users, courses, enrollments,
    /// evaluations, then scores. Stops at the first failing operation.
    pub fn apply(&self, registry: &mut Registry) -> Result<()> {
        for p in &self.professors {
            registry
                .register_user(User::professor(&p.id, &p.name, &p.email, &p.department))
                .with_context(|| format!("registering professor {}", p.id))?;
        }
        for s in &self.students {
            registry
                .register_user(User::student(&s.id, &s.name, &s.email, &s.student_number))
                .with_context(|| format!("registering student {}", s.id))?;
        }

        for course in &self.courses {
            registry
                .create_course(&course.name, &course.code, &course.professor)
                .with_context(|| format!("creating course {}", course.code))?;

            for student_id in &course.students {
                registry
                    .enroll_student(&course.code, student_id)
                    .with_context(|| format!("enrolling {student_id} in {}", course.code))?;
            }

            for ev in &course.evaluations {
                let id = registry
                    .create_evaluation(
                        &course.code,
                        &ev.kind,
                        &ev.title,
                        ev.max_score,
                        ev.weight,
                    )
                    .with_context(|| {
                        format!("creating evaluation '{}' in {}", ev.title, course.code)
                    })?
                    .id();

                for (student_id, score) in &ev.scores {
                    registry
                        .record_score(&course.code, id, student_id, *score)
                        .with_context(|| {
                            format!("recording score for {student_id} on '{}'", ev.title)
                        })?;
                }
            }
        }

        Ok(())
    }

    /// Builds a fresh registry from this roster.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();
        self.apply(&mut registry)?;
        Ok(registry)
    }

    /// Number of evaluations across all courses.
    pub fn evaluation_count(&self) -> usize {
        self.courses.iter().map(|c| c.evaluations.len()).sum()
    }
}

/// A warning from roster validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course code (if applicable).
    pub course: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn global(message: String) -> Self {
        Self {
            course: None,
            message,
        }
    }

    fn in_course(course: &str, message: String) -> Self {
        Self {
            course: Some(course.to_string()),
            message,
        }
    }
}

/// Validate a roster for issues that would make [`Roster::apply`] fail or
/// produce surprising averages.
pub fn validate_roster(roster: &Roster) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate user ids across both roles
    let mut seen_ids = HashSet::new();
    let user_ids = roster
        .professors
        .iter()
        .map(|p| &p.id)
        .chain(roster.students.iter().map(|s| &s.id));
    for id in user_ids {
        if !seen_ids.insert(id.as_str()) {
            warnings.push(ValidationWarning::global(format!("duplicate user ID: {id}")));
        }
    }

    let professors: HashSet<&str> = roster.professors.iter().map(|p| p.id.as_str()).collect();
    let students: HashSet<&str> = roster.students.iter().map(|s| s.id.as_str()).collect();

    let mut seen_codes = HashSet::new();
    for course in &roster.courses {
        let code = course.code.as_str();

        if !seen_codes.insert(code) {
            warnings.push(ValidationWarning::in_course(
                code,
                format!("duplicate course code: {code}"),
            ));
        }

        if !professors.contains(course.professor.as_str()) {
            warnings.push(ValidationWarning::in_course(
                code,
                format!("unknown professor: {}", course.professor),
            ));
        }

        for student_id in &course.students {
            if !students.contains(student_id.as_str()) {
                warnings.push(ValidationWarning::in_course(
                    code,
                    format!("unknown student: {student_id}"),
                ));
            }
        }

        for ev in &course.evaluations {
            if ev.weight <= 0.0 {
                warnings.push(ValidationWarning::in_course(
                    code,
                    format!("evaluation '{}' has non-positive weight {}", ev.title, ev.weight),
                ));
            }
            for student_id in ev.scores.keys() {
                if !course.students.contains(student_id) {
                    warnings.push(ValidationWarning::in_course(
                        code,
                        format!(
                            "score on '{}' for {student_id}, who is not enrolled",
                            ev.title
                        ),
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EvaluationKind;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[professors]]
id = "p1"
name = "Ada"
email = "ada@uni.edu"
department = "Math"

[[students]]
id = "s1"
name = "Bo"
email = "bo@uni.edu"
student_number = "2024-001"

[[students]]
id = "s2"
name = "Cy"
email = "cy@uni.edu"
student_number = "2024-002"

[[courses]]
code = "MAT101"
name = "Calculus"
professor = "p1"
students = ["s1", "s2"]

[[courses.evaluations]]
kind = "assignment"
title = "Quiz"
max_score = 10.0
scores = { s1 = 5.0 }

[[courses.evaluations]]
kind = "exam"
title = "Midterm"
max_score = 50.0
weight = 3.0
scores = { s1 = 40.0 }
"#;

    fn parse(content: &str) -> Roster {
        parse_roster_str(content, &PathBuf::from("test.toml")).unwrap()
    }

    #[test]
    fn parse_valid_toml() {
        let roster = parse(VALID_TOML);
        assert_eq!(roster.professors.len(), 1);
        assert_eq!(roster.students.len(), 2);
        assert_eq!(roster.courses[0].students, vec!["s1", "s2"]);
        assert_eq!(roster.evaluation_count(), 2);
        assert_eq!(roster.courses[0].evaluations[0].weight, 1.0);
        assert_eq!(roster.courses[0].evaluations[1].scores.get("s1"), Some(&40.0));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let roster = parse(
            r#"
[[courses]]
code = "X1"
name = "X"
professor = "p1"

[[courses.evaluations]]
title = "Anything"
max_score = 5.0
"#,
        );
        assert!(roster.professors.is_empty());
        let ev = &roster.courses[0].evaluations[0];
        assert_eq!(ev.kind, "generic");
        assert!(ev.scores.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let result = parse_roster_str("this is not [valid toml }{", &PathBuf::from("bad.toml"));
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
    }

    #[test]
    fn apply_builds_registry() {
        let reg = parse(VALID_TOML).build_registry().unwrap();

        let course = reg.course("MAT101").unwrap();
        assert_eq!(course.roster().len(), 2);
        assert_eq!(course.evaluations()[1].kind(), EvaluationKind::Exam);
        let avg = reg.student_average("MAT101", "s1").unwrap().unwrap();
        assert!((avg - 72.5).abs() < 1e-9);
        assert_eq!(reg.student_average("MAT101", "s2").unwrap(), None);
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let roster = parse(
            r#"
[[professors]]
id = "p1"
name = "Ada"
email = "ada@uni.edu"

[[courses]]
code = "X1"
name = "X"
professor = "p1"

[[courses.evaluations]]
title = "Broken"
max_score = 0.0
"#,
        );
        let err = roster.build_registry().unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("creating evaluation 'Broken' in X1"), "{msg}");
        assert!(msg.contains("max_score must be finite and > 0"), "{msg}");
    }

    #[test]
    fn validate_clean_roster() {
        assert!(validate_roster(&parse(VALID_TOML)).is_empty());
    }

    #[test]
    fn validate_reports_problems() {
        let roster = parse(
            r#"
[[professors]]
id = "dup"
name = "Ada"
email = "ada@uni.edu"

[[students]]
id = "dup"
name = "Bo"
email = "bo@uni.edu"
student_number = "1"

[[courses]]
code = "C1"
name = "One"
professor = "ghost"
students = ["nobody"]

[[courses.evaluations]]
title = "Free"
max_score = 10.0
weight = 0.0
scores = { dup = 3.0 }

[[courses]]
code = "C1"
name = "Again"
professor = "dup"
"#,
        );
        let warnings = validate_roster(&roster);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate user ID: dup"));
        assert!(has("duplicate course code: C1"));
        assert!(has("unknown professor: ghost"));
        assert!(has("unknown student: nobody"));
        assert!(has("non-positive weight"));
        assert!(has("not enrolled"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("term.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let rosters = load_roster_directory(dir.path()).unwrap();
        assert_eq!(rosters.len(), 1);
        assert_eq!(rosters[0].courses[0].code, "MAT101");
    }

    #[test]
    fn directory_rosters_apply_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("c_terms")).unwrap();
        std::fs::write(
            dir.path().join("c_terms").join("fall.toml"),
            r#"
[[students]]
id = "s2"
name = "Cy"
email = "cy@uni.edu"
student_number = "2"
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b_course.toml"),
            r#"
[[courses]]
code = "C1"
name = "Calculus"
professor = "p1"
students = ["s1"]
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a_people.toml"),
            r#"
[[professors]]
id = "p1"
name = "Ada"
email = "ada@uni.edu"

[[students]]
id = "s1"
name = "Bo"
email = "bo@uni.edu"
student_number = "1"
"#,
        )
        .unwrap();

        let rosters = load_roster_directory(dir.path()).unwrap();
        let professors: Vec<usize> = rosters.iter().map(|r| r.professors.len()).collect();
        assert_eq!(professors, [1, 0, 0]);

        let mut registry = Registry::new();
        for roster in &rosters {
            roster.apply(&mut registry).unwrap();
        }
        assert_eq!(registry.course("C1").unwrap().student_names(), ["Bo"]);
        assert_eq!(registry.list_students().len(), 2);
    }
}
