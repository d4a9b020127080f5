//! Courses: the roster of enrolled students and the owned evaluations.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::evaluation::Evaluation;
use crate::model::User;

/// A student's place on a course roster.
///
/// Holds keys and an immutable snapshot of the fields the course needs; the
/// student itself stays owned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub student_number: String,
    pub name: String,
}

/// A course taught by one professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    name: String,
    code: String,
    professor_id: String,
    roster: Vec<Enrollment>,
    evaluations: Vec<Evaluation>,
}

impl Course {
    pub(crate) fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        professor_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            professor_id: professor_id.into(),
            roster: Vec::new(),
            evaluations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Id of the owning professor; resolve it through the registry.
    pub fn professor_id(&self) -> &str {
        &self.professor_id
    }

    /// Enrolled students, in enrollment order.
    pub fn roster(&self) -> &[Enrollment] {
        &self.roster
    }

    /// Evaluations, in creation order.
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn evaluation(&self, id: u64) -> Option<&Evaluation> {
        self.evaluations.iter().find(|ev| ev.id() == id)
    }

    pub(crate) fn evaluation_mut(&mut self, id: u64) -> Option<&mut Evaluation> {
        self.evaluations.iter_mut().find(|ev| ev.id() == id)
    }

    /// Names of enrolled students, in enrollment order.
    pub fn student_names(&self) -> Vec<&str> {
        self.roster.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.roster.iter().any(|e| e.student_id == student_id)
    }

    /// Enrolls a student, updating the roster and the student's course list together.
    ///
    /// Duplicates are detected by student number on the roster side and by
    /// course code on the student side; either one rejects the whole step.
    pub fn enroll(&mut self, student: &mut User) -> Result<(), RegistryError> {
        let student_id = student.id.clone();
        let name = student.name.clone();
        let profile = student
            .as_student_mut()
            .ok_or_else(|| RegistryError::NotAStudent(student_id.clone()))?;

        let already_enrolled = self
            .roster
            .iter()
            .any(|e| e.student_number == profile.student_number)
            || profile.is_enrolled_in(&self.code);
        if already_enrolled {
            return Err(RegistryError::AlreadyEnrolled {
                course: self.code.clone(),
                student_number: profile.student_number.clone(),
            });
        }

        profile.courses.push(self.code.clone());
        self.roster.push(Enrollment {
            student_id,
            student_number: profile.student_number.clone(),
            name,
        });
        Ok(())
    }

    /// Appends an evaluation. Fails if one with the same id is already present.
    pub fn add_evaluation(&mut self, evaluation: Evaluation) -> Result<(), RegistryError> {
        if self.evaluation(evaluation.id()).is_some() {
            return Err(RegistryError::DuplicateEvaluationId {
                course: self.code.clone(),
                id: evaluation.id(),
            });
        }
        self.evaluations.push(evaluation);
        Ok(())
    }

    /// Weighted average of the student's percentages over graded evaluations.
    ///
    /// Ungraded evaluations are skipped rather than counted as zero. Returns
    /// `None` when the applicable weights sum to zero (nothing graded yet).
    pub fn average(&self, student_id: &str) -> Option<f64> {
        let (weighted_sum, weight_sum) = self
            .evaluations
            .iter()
            .filter_map(|ev| ev.percentage(student_id).map(|pct| (pct, ev.weight())))
            .fold((0.0f64, 0.0f64), |(sum, weights), (pct, w)| {
                (sum + pct * w, weights + w)
            });

        if weight_sum == 0.0 {
            return None;
        }
        Some(weighted_sum / weight_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EvaluationKind;

    fn course() -> Course {
        Course::new("Calculus", "MAT101", "p1")
    }

    fn eval(id: u64, max_score: f64, weight: f64) -> Evaluation {
        Evaluation::new(id, format!("eval-{id}"), max_score, weight, EvaluationKind::Generic)
            .unwrap()
    }

    #[test]
    fn enroll_updates_both_sides() {
        let mut c = course();
        let mut s = User::student("s1", "Bo", "bo@uni.edu", "2024-001");
        c.enroll(&mut s).unwrap();

        assert_eq!(c.roster().len(), 1);
        assert_eq!(c.student_names(), vec!["Bo"]);
        assert!(c.is_enrolled("s1"));
        assert_eq!(s.as_student().unwrap().courses(), ["MAT101".to_string()]);
    }

    #[test]
    fn enroll_rejects_same_student_number() {
        let mut c = course();
        let mut first = User::student("s1", "Bo", "bo@uni.edu", "2024-001");
        let mut twin = User::student("s2", "Cy", "cy@uni.edu", "2024-001");
        c.enroll(&mut first).unwrap();

        let err = c.enroll(&mut twin).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyEnrolled { .. }));
        assert_eq!(c.roster().len(), 1);
        assert!(twin.as_student().unwrap().courses().is_empty());
    }

    #[test]
    fn enroll_rejects_professor() {
        let mut c = course();
        let mut p = User::professor("p2", "Ada", "ada@uni.edu", "Math");
        assert_eq!(
            c.enroll(&mut p),
            Err(RegistryError::NotAStudent("p2".into()))
        );
        assert!(c.roster().is_empty());
    }

    #[test]
    fn add_evaluation_rejects_duplicate_id() {
        let mut c = course();
        c.add_evaluation(eval(1, 10.0, 1.0)).unwrap();
        let err = c.add_evaluation(eval(1, 20.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateEvaluationId {
                course: "MAT101".into(),
                id: 1
            }
        );
        assert_eq!(c.evaluations().len(), 1);
        assert_eq!(c.evaluation(1).unwrap().max_score(), 10.0);
    }

    #[test]
    fn weighted_average_mixes_scales() {
        let mut c = course();
        let mut quiz = eval(1, 10.0, 1.0);
        let mut exam = eval(2, 50.0, 3.0);
        quiz.record_score("s1", 5.0).unwrap();
        exam.record_score("s1", 40.0).unwrap();
        c.add_evaluation(quiz).unwrap();
        c.add_evaluation(exam).unwrap();

        let avg = c.average("s1").unwrap();
        assert!((avg - 72.5).abs() < 1e-9, "expected 72.5, got {avg}");
    }

    #[test]
    fn average_skips_ungraded_evaluations() {
        let mut c = course();
        let mut graded = eval(1, 20.0, 1.0);
        graded.record_score("s1", 15.0).unwrap();
        c.add_evaluation(graded).unwrap();
        c.add_evaluation(eval(2, 100.0, 5.0)).unwrap();

        assert_eq!(c.average("s1"), Some(75.0));
    }

    #[test]
    fn average_absent_without_grades() {
        let mut c = course();
        assert_eq!(c.average("s1"), None);
        c.add_evaluation(eval(1, 10.0, 1.0)).unwrap();
        assert_eq!(c.average("s1"), None);
    }

    #[test]
    fn average_absent_when_weights_cancel() {
        let mut c = course();
        let mut zero = eval(1, 10.0, 0.0);
        zero.record_score("s1", 10.0).unwrap();
        c.add_evaluation(zero).unwrap();
        assert_eq!(c.average("s1"), None);
    }
}
