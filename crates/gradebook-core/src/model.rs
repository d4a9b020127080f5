//! Identity records and shared tags.
//!
//! A [`User`] is either a student or a professor. The role is a closed enum
//! carrying the role-specific fields, so the registry only has to match on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered person, keyed by `id` across the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Globally unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Role-specific data.
    pub role: Role,
}

/// The closed set of user variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    Student(StudentProfile),
    Professor(ProfessorProfile),
}

/// Student-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Secondary identifier used for the duplicate-enrollment check.
    pub student_number: String,
    /// Codes of the courses this student joined, in join order.
    #[serde(default)]
    pub(crate) courses: Vec<String>,
}

impl StudentProfile {
    /// Course codes this student is enrolled in.
    pub fn courses(&self) -> &[String] {
        &self.courses
    }

    pub(crate) fn is_enrolled_in(&self, course_code: &str) -> bool {
        self.courses.iter().any(|c| c == course_code)
    }
}

/// Professor-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessorProfile {
    pub department: String,
}

impl User {
    /// Creates a student. Strings are stored as given, without normalization.
    pub fn student(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        student_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::Student(StudentProfile {
                student_number: student_number.into(),
                courses: Vec::new(),
            }),
        }
    }

    /// Creates a professor.
    pub fn professor(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::Professor(ProfessorProfile {
                department: department.into(),
            }),
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.role {
            Role::Student(s) => Some(s),
            Role::Professor(_) => None,
        }
    }

    pub(crate) fn as_student_mut(&mut self) -> Option<&mut StudentProfile> {
        match &mut self.role {
            Role::Student(s) => Some(s),
            Role::Professor(_) => None,
        }
    }

    pub fn as_professor(&self) -> Option<&ProfessorProfile> {
        match &self.role {
            Role::Professor(p) => Some(p),
            Role::Student(_) => None,
        }
    }

    pub fn is_student(&self) -> bool {
        self.as_student().is_some()
    }

    pub fn is_professor(&self) -> bool {
        self.as_professor().is_some()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}

/// What kind of gradable item an evaluation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    Exam,
    Assignment,
    #[default]
    Generic,
}

impl EvaluationKind {
    /// Parses a kind tag, falling back to [`EvaluationKind::Generic`] for
    /// anything unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationKind::Exam => write!(f, "exam"),
            EvaluationKind::Assignment => write!(f, "assignment"),
            EvaluationKind::Generic => write!(f, "generic"),
        }
    }
}

impl FromStr for EvaluationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exam" => Ok(EvaluationKind::Exam),
            "assignment" | "homework" => Ok(EvaluationKind::Assignment),
            "generic" => Ok(EvaluationKind::Generic),
            other => Err(format!("unknown evaluation kind: {other}")),
        }
    }
}
