//! Error types for the assessment core and its store ports.
//!
//! Store failures are kept as their own type so callers can tell an
//! unreachable backend apart from a misconfigured assessment without
//! string matching.

use thiserror::Error;

use crate::model::Level;

/// Failures reported by a question, catalog or result store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("{store} store unavailable: {message}")]
    Unavailable { store: &'static str, message: String },

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored record could not be decoded.
    #[error("malformed record {id}: {message}")]
    Malformed { id: String, message: String },

    /// A filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` if retrying the same operation later may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. } | StoreError::Io(_))
    }
}

/// Errors raised by the assessment core.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// A zero-length assessment was handed to the scorer.
    #[error("assessment has no questions")]
    EmptyQuestionSet,

    /// The catalog holds no modules for the requested course and level.
    #[error("no learning path available for course '{course_id}' at level {level}")]
    NoPathAvailable { course_id: String, level: Level },

    /// The attempt has not been started yet.
    #[error("attempt has not started")]
    NotStarted,

    /// The attempt is completed and accepts no more answers.
    #[error("attempt already completed")]
    AttemptCompleted,

    /// Advancing past a question that has no answer.
    #[error("question '{0}' must be answered before advancing")]
    AnswerRequired(String),

    /// A store port failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AssessmentError {
    /// Returns `true` for errors caused by assessment or catalog data
    /// rather than learner actions or store availability.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AssessmentError::EmptyQuestionSet | AssessmentError::NoPathAvailable { .. }
        )
    }
}
