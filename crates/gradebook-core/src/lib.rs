//! gradebook-core — Academic records engine.
//!
//! This crate defines the entity graph (registry → courses → evaluations and
//! enrollments), its consistency rules, the weighted-average computation, and
//! the roster loader that the `gradebook` CLI builds on.

pub mod course;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod parser;
pub mod registry;
pub mod report;

pub use course::{Course, Enrollment};
pub use error::{EntityKind, RegistryError};
pub use evaluation::{Evaluation, DEFAULT_WEIGHT};
pub use model::{EvaluationKind, ProfessorProfile, Role, StudentProfile, User};
pub use registry::Registry;
pub use report::{CourseReport, LowPerformer};
