//! Derived reports: low performers and per-course standings.

use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::error::RegistryError;
use crate::model::EvaluationKind;
use crate::registry::Registry;

/// Rounds a percentage to two decimals for presentation.
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A student whose average fell below a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowPerformer {
    pub id: String,
    pub name: String,
    /// Weighted average, rounded to two decimals.
    pub average: f64,
}

/// Full standing of one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReport {
    pub code: String,
    pub name: String,
    pub professor: String,
    pub evaluations: Vec<EvaluationSummary>,
    pub students: Vec<StudentStanding>,
}

/// An evaluation as it appears in a course report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub id: u64,
    pub title: String,
    pub kind: EvaluationKind,
    pub max_score: f64,
    pub weight: f64,
    /// How many students have a recorded score.
    pub graded: usize,
}

/// One enrolled student's average in a course report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentStanding {
    pub id: String,
    pub name: String,
    pub student_number: String,
    /// Rounded weighted average; `None` when nothing is graded yet.
    pub average: Option<f64>,
}

impl CourseReport {
    /// Builds the report for a course held by `registry`.
    pub fn build(registry: &Registry, course: &Course) -> Result<Self, RegistryError> {
        let professor = registry.professor_of(course)?;

        let evaluations = course
            .evaluations()
            .iter()
            .map(|ev| EvaluationSummary {
                id: ev.id(),
                title: ev.title().to_string(),
                kind: ev.kind(),
                max_score: ev.max_score(),
                weight: ev.weight(),
                graded: ev.graded_count(),
            })
            .collect();

        let students = course
            .roster()
            .iter()
            .map(|entry| StudentStanding {
                id: entry.student_id.clone(),
                name: entry.name.clone(),
                student_number: entry.student_number.clone(),
                average: course.average(&entry.student_id).map(round_percent),
            })
            .collect();

        Ok(Self {
            code: course.code().to_string(),
            name: course.name().to_string(),
            professor: professor.name.clone(),
            evaluations,
            students,
        })
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## {} — {}\n\n**Professor:** {}\n\n",
            self.code, self.name, self.professor
        ));

        if self.evaluations.is_empty() {
            md.push_str("_No evaluations yet._\n\n");
        } else {
            md.push_str("### Evaluations\n\n");
            md.push_str("| ID | Title | Kind | Max | Weight | Graded |\n");
            md.push_str("|----|-------|------|-----|--------|--------|\n");
            for ev in &self.evaluations {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    ev.id, ev.title, ev.kind, ev.max_score, ev.weight, ev.graded
                ));
            }
            md.push('\n');
        }

        if self.students.is_empty() {
            md.push_str("_No students enrolled._\n");
        } else {
            md.push_str("### Students\n\n");
            md.push_str("| ID | Name | Number | Average |\n");
            md.push_str("|----|------|--------|---------|\n");
            for s in &self.students {
                let average = s
                    .average
                    .map(|avg| format!("{avg:.2}%"))
                    .unwrap_or_else(|| "—".to_string());
                md.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    s.id, s.name, s.student_number, average
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.register_user(User::professor("p1", "Ada", "ada@uni.edu", "Math"))
            .unwrap();
        reg.register_user(User::student("s1", "Bo", "bo@uni.edu", "2024-001"))
            .unwrap();
        reg.register_user(User::student("s2", "Cy", "cy@uni.edu", "2024-002"))
            .unwrap();
        reg.create_course("Calculus", "MAT101", "p1").unwrap();
        reg.enroll_student("MAT101", "s1").unwrap();
        reg.enroll_student("MAT101", "s2").unwrap();
        let id = reg
            .create_evaluation("MAT101", "exam", "Midterm", 3.0, 2.0)
            .unwrap()
            .id();
        reg.record_score("MAT101", id, "s1", 2.0).unwrap();
        reg
    }

    #[test]
    fn round_percent_two_decimals() {
        assert_eq!(round_percent(72.5), 72.5);
        assert_eq!(round_percent(66.666_666), 66.67);
        assert_eq!(round_percent(0.004), 0.0);
    }

    #[test]
    fn build_collects_standings() {
        let reg = registry();
        let report = reg.course_report("MAT101").unwrap();

        assert_eq!(report.professor, "Ada");
        assert_eq!(report.evaluations.len(), 1);
        assert_eq!(report.evaluations[0].graded, 1);
        assert_eq!(report.evaluations[0].kind, EvaluationKind::Exam);
        assert_eq!(report.students.len(), 2);
        assert_eq!(report.students[0].average, Some(66.67));
        assert_eq!(report.students[1].average, None);
    }

    #[test]
    fn markdown_output() {
        let md = registry().course_report("MAT101").unwrap().to_markdown();
        assert!(md.contains("MAT101"));
        assert!(md.contains("Midterm"));
        assert!(md.contains("66.67%"));
        assert!(md.contains("| s2 | Cy | 2024-002 | — |"));
    }

    #[test]
    fn json_shape() {
        let report = registry().course_report("MAT101").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["code"], "MAT101");
        assert_eq!(json["evaluations"][0]["kind"], "exam");
        assert!(json["students"][1]["average"].is_null());
    }

    #[test]
    fn unknown_course_is_not_found() {
        assert!(registry().course_report("NOPE").is_err());
    }
}
