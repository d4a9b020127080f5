//! The registry: top-level owner of users and courses.
//!
//! Every cross-entity operation goes through [`Registry`], which resolves keys
//! into owned entities, checks roles, and delegates the mutation to the course
//! or evaluation. A failed operation leaves the registry unchanged.

use std::collections::HashMap;

use crate::course::Course;
use crate::error::RegistryError;
use crate::evaluation::Evaluation;
use crate::model::{EvaluationKind, User};
use crate::report::{round_percent, CourseReport, LowPerformer};

/// In-memory academic records registry.
#[derive(Debug, Clone)]
pub struct Registry {
    users: HashMap<String, User>,
    /// User ids in registration order.
    user_order: Vec<String>,
    courses: HashMap<String, Course>,
    /// Course codes in creation order.
    course_order: Vec<String>,
    next_evaluation_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            user_order: Vec::new(),
            courses: HashMap::new(),
            course_order: Vec::new(),
            next_evaluation_id: 1,
        }
    }

    /// Registers a user of any role. Ids are unique across roles.
    pub fn register_user(&mut self, user: User) -> Result<&User, RegistryError> {
        if self.users.contains_key(&user.id) {
            return Err(RegistryError::DuplicateId(user.id));
        }
        tracing::debug!(id = %user.id, student = user.is_student(), "user registered");
        let id = user.id.clone();
        self.user_order.push(id.clone());
        Ok(self.users.entry(id).or_insert(user))
    }

    /// Creates a course owned by an existing professor.
    pub fn create_course(
        &mut self,
        name: &str,
        code: &str,
        professor_id: &str,
    ) -> Result<&Course, RegistryError> {
        if self.courses.contains_key(code) {
            return Err(RegistryError::DuplicateCode(code.to_string()));
        }
        let professor = self.user(professor_id)?;
        if !professor.is_professor() {
            return Err(RegistryError::NotAProfessor(professor_id.to_string()));
        }

        tracing::debug!(code, professor = professor_id, "course created");
        self.course_order.push(code.to_string());
        Ok(self
            .courses
            .entry(code.to_string())
            .or_insert_with(|| Course::new(name, code, professor_id)))
    }

    /// Enrolls a registered student in a course.
    pub fn enroll_student(
        &mut self,
        course_code: &str,
        student_id: &str,
    ) -> Result<(), RegistryError> {
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistryError::course_not_found(course_code))?;
        let student = self
            .users
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::user_not_found(student_id))?;
        if !student.is_student() {
            return Err(RegistryError::NotAStudent(student_id.to_string()));
        }

        course.enroll(student)?;
        tracing::debug!(course = course_code, student = student_id, "student enrolled");
        Ok(())
    }

    /// Creates an evaluation in a course and returns it.
    ///
    /// Ids come from a registry-wide counter, so they never collide across
    /// courses. An unrecognized `kind` yields a generic evaluation. The counter
    /// only advances when the evaluation is actually added.
    pub fn create_evaluation(
        &mut self,
        course_code: &str,
        kind: &str,
        title: &str,
        max_score: f64,
        weight: f64,
    ) -> Result<&Evaluation, RegistryError> {
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistryError::course_not_found(course_code))?;

        let id = self.next_evaluation_id;
        let evaluation =
            Evaluation::new(id, title, max_score, weight, EvaluationKind::from_tag(kind))?;
        course.add_evaluation(evaluation)?;
        self.next_evaluation_id += 1;

        tracing::debug!(course = course_code, id, kind, "evaluation created");
        course
            .evaluation(id)
            .ok_or_else(|| RegistryError::evaluation_not_found(id))
    }

    /// Records a student's raw score on an evaluation of a course.
    ///
    /// The student must be registered as a student; course enrollment is not required.
    pub fn record_score(
        &mut self,
        course_code: &str,
        evaluation_id: u64,
        student_id: &str,
        score: f64,
    ) -> Result<(), RegistryError> {
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistryError::course_not_found(course_code))?;
        let evaluation = course
            .evaluation_mut(evaluation_id)
            .ok_or_else(|| RegistryError::evaluation_not_found(evaluation_id))?;
        if !self.users.get(student_id).is_some_and(User::is_student) {
            return Err(RegistryError::NotAStudent(student_id.to_string()));
        }

        evaluation.record_score(student_id, score)?;
        tracing::debug!(
            course = course_code,
            evaluation = evaluation_id,
            student = student_id,
            score,
            "score recorded"
        );
        Ok(())
    }

    /// Weighted average of a student in a course; `None` if nothing is graded.
    pub fn student_average(
        &self,
        course_code: &str,
        student_id: &str,
    ) -> Result<Option<f64>, RegistryError> {
        Ok(self.course(course_code)?.average(student_id))
    }

    /// Enrolled students whose average is strictly below `threshold_percent`.
    ///
    /// Students without any recorded score are left out. Averages are rounded
    /// to two decimals in the output; the comparison uses the exact value.
    pub fn low_performers(
        &self,
        course_code: &str,
        threshold_percent: f64,
    ) -> Result<Vec<LowPerformer>, RegistryError> {
        let course = self.course(course_code)?;
        Ok(course
            .roster()
            .iter()
            .filter_map(|entry| {
                let average = course.average(&entry.student_id)?;
                (average < threshold_percent).then(|| LowPerformer {
                    id: entry.student_id.clone(),
                    name: self
                        .users
                        .get(&entry.student_id)
                        .map_or_else(|| entry.name.clone(), |u| u.name.clone()),
                    average: round_percent(average),
                })
            })
            .collect())
    }

    /// Standings of every enrolled student plus an evaluation summary.
    pub fn course_report(&self, course_code: &str) -> Result<CourseReport, RegistryError> {
        CourseReport::build(self, self.course(course_code)?)
    }

    /// Looks up a user by id.
    pub fn user(&self, id: &str) -> Result<&User, RegistryError> {
        self.users
            .get(id)
            .ok_or_else(|| RegistryError::user_not_found(id))
    }

    /// Looks up a course by code.
    pub fn course(&self, code: &str) -> Result<&Course, RegistryError> {
        self.courses
            .get(code)
            .ok_or_else(|| RegistryError::course_not_found(code))
    }

    /// The professor owning a course.
    pub fn professor_of(&self, course: &Course) -> Result<&User, RegistryError> {
        self.user(course.professor_id())
    }

    /// Courses a student has joined, in join order.
    pub fn courses_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<&Course>, RegistryError> {
        let profile = self
            .user(student_id)?
            .as_student()
            .ok_or_else(|| RegistryError::NotAStudent(student_id.to_string()))?;
        profile
            .courses()
            .iter()
            .map(|code| self.course(code))
            .collect()
    }

    /// All users in registration order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.user_order.iter().filter_map(|id| self.users.get(id))
    }

    /// Registered professors, in registration order.
    pub fn list_professors(&self) -> Vec<&User> {
        self.users().filter(|u| u.is_professor()).collect()
    }

    /// Registered students, in registration order.
    pub fn list_students(&self) -> Vec<&User> {
        self.users().filter(|u| u.is_student()).collect()
    }

    /// All courses, in creation order.
    pub fn list_courses(&self) -> Vec<&Course> {
        self.course_order
            .iter()
            .filter_map(|code| self.courses.get(code))
            .collect()
    }
}
