//! Registry error types.
//!
//! Every mutating or keyed operation on the registry fails with exactly one of
//! these kinds. Absent computed data (an ungraded average) is not an error and
//! is returned as `None` instead.

use std::fmt;

use thiserror::Error;

/// The kind of entity a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Course,
    Evaluation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Course => write!(f, "course"),
            EntityKind::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Errors raised by the academic records engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// A user with this id is already registered (any role).
    #[error("user already registered: {0}")]
    DuplicateId(String),

    /// A course with this code already exists.
    #[error("course code already exists: {0}")]
    DuplicateCode(String),

    /// The course already holds an evaluation with this id.
    #[error("evaluation {id} already exists in course {course}")]
    DuplicateEvaluationId { course: String, id: u64 },

    /// The student (matched by student number) is already on the roster.
    #[error("student {student_number} is already enrolled in {course}")]
    AlreadyEnrolled {
        course: String,
        student_number: String,
    },

    /// A referenced id or code does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    /// The operation needs a student and the user is missing or has another role.
    #[error("user is not a student or does not exist: {0}")]
    NotAStudent(String),

    /// The operation needs a professor and the user has another role.
    #[error("user is not a professor: {0}")]
    NotAProfessor(String),

    /// A constructed value breaks a structural precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A recorded score falls outside `[0, max_score]`.
    #[error("score {score} out of range [0, {max_score}]")]
    OutOfRange { score: f64, max_score: f64 },
}

impl RegistryError {
    pub(crate) fn user_not_found(id: &str) -> Self {
        RegistryError::NotFound {
            entity: EntityKind::User,
            key: id.to_string(),
        }
    }

    pub(crate) fn course_not_found(code: &str) -> Self {
        RegistryError::NotFound {
            entity: EntityKind::Course,
            key: code.to_string(),
        }
    }

    pub(crate) fn evaluation_not_found(id: u64) -> Self {
        RegistryError::NotFound {
            entity: EntityKind::Evaluation,
            key: id.to_string(),
        }
    }

    /// Returns `true` if the error reports a violated uniqueness rule.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RegistryError::DuplicateId(_)
                | RegistryError::DuplicateCode(_)
                | RegistryError::DuplicateEvaluationId { .. }
                | RegistryError::AlreadyEnrolled { .. }
        )
    }
}
