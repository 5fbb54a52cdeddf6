//! Store ports consumed by the learning service.
//!
//! These async traits are implemented by the `pathwise-store` crate. The core
//! only ever reads questions and catalogs, and hands finished results to a
//! [`ResultStore`]; it never retries a failed store call.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{AssessmentResult, LearningModule, Level, PathDescriptor, Question};

// ---------------------------------------------------------------------------
// Question store
// ---------------------------------------------------------------------------

/// Source of diagnostic questions.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions for `course_id`, ordered by difficulty ascending.
    ///
    /// An unknown course yields an empty list.
    async fn questions(&self, course_id: &str) -> Result<Vec<Question>, StoreError>;
}

// ---------------------------------------------------------------------------
// Catalog store
// ---------------------------------------------------------------------------

/// Source of learning-path catalogs.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// The path header and its modules, ordered by `sequence` ascending.
    ///
    /// Returns `Ok(None)` if the catalog has no path for the pair.
    async fn path(
        &self,
        course_id: &str,
        level: Level,
    ) -> Result<Option<(PathDescriptor, Vec<LearningModule>)>, StoreError>;
}

// ---------------------------------------------------------------------------
// Result store
// ---------------------------------------------------------------------------

/// Durable storage for completed attempts.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store one completed attempt.
    async fn save(&self, result: &AssessmentResult) -> Result<(), StoreError>;

    /// Stored results for a learner in a course, oldest first.
    async fn history(
        &self,
        learner_id: &str,
        course_id: &str,
    ) -> Result<Vec<AssessmentResult>, StoreError>;
}
