//! Gradable items and their per-student scores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::model::EvaluationKind;

/// Default weight for an evaluation when none is given.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A gradable item owned by a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    id: u64,
    title: String,
    max_score: f64,
    weight: f64,
    kind: EvaluationKind,
    /// Raw scores keyed by student id.
    #[serde(default)]
    scores: HashMap<String, f64>,
}

impl Evaluation {
    /// Creates an evaluation. Fails with `InvalidArgument` unless `max_score` is
    /// finite and `> 0`.
    ///
    /// The weight is stored as given; zero or negative weights are not rejected here.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        max_score: f64,
        weight: f64,
        kind: EvaluationKind,
    ) -> Result<Self, RegistryError> {
        if !max_score.is_finite() || max_score <= 0.0 {
            return Err(RegistryError::InvalidArgument(format!(
                "max_score must be finite and > 0, got {max_score}"
            )));
        }
        Ok(Self {
            id,
            title: title.into(),
            max_score,
            weight,
            kind,
            scores: HashMap::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn kind(&self) -> EvaluationKind {
        self.kind
    }

    /// Number of students with a recorded score.
    pub fn graded_count(&self) -> usize {
        self.scores.len()
    }

    /// Records a raw score, replacing any earlier one for the same student.
    ///
    /// Out-of-range scores are rejected, never clamped.
    pub fn record_score(
        &mut self,
        student_id: impl Into<String>,
        raw_score: f64,
    ) -> Result<(), RegistryError> {
        if !(0.0..=self.max_score).contains(&raw_score) {
            return Err(RegistryError::OutOfRange {
                score: raw_score,
                max_score: self.max_score,
            });
        }
        self.scores.insert(student_id.into(), raw_score);
        Ok(())
    }

    /// The raw score recorded for a student, if any.
    pub fn score(&self, student_id: &str) -> Option<f64> {
        self.scores.get(student_id).copied()
    }

    /// The student's score as a percentage of `max_score`, or `None` when ungraded.
    pub fn percentage(&self, student_id: &str) -> Option<f64> {
        self.score(student_id).map(|raw| raw / self.max_score * 100.0)
    }
}
