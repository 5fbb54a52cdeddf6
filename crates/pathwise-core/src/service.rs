//! Learning service: wires the pure core to its store ports.
//!
//! Computing a result and persisting it are separate calls, so a failed
//! write is visible to the caller instead of being swallowed.

use std::sync::Arc;

use crate::error::AssessmentError;
use crate::model::{AssessmentResult, ConceptScores, LearnerContext, LearningPath, Level};
use crate::personalize::build_path;
use crate::session::AssessmentSession;
use crate::traits::{CatalogStore, QuestionStore, ResultStore};

/// Entry point for running assessments and building learning paths.
pub struct LearningService {
    questions: Arc<dyn QuestionStore>,
    catalog: Arc<dyn CatalogStore>,
    results: Arc<dyn ResultStore>,
}

impl LearningService {
    pub fn new(
        questions: Arc<dyn QuestionStore>,
        catalog: Arc<dyn CatalogStore>,
        results: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            questions,
            catalog,
            results,
        }
    }

    /// Load the course's questions and start a new attempt.
    pub async fn begin(&self, context: LearnerContext) -> Result<AssessmentSession, AssessmentError> {
        let mut questions = self.questions.questions(&context.course_id).await?;
        // Stores promise this order already; a stable sort keeps authored order within a tier.
        questions.sort_by_key(|q| q.difficulty);

        let mut session = AssessmentSession::new(context, questions)?;
        session.start()?;
        tracing::info!(
            attempt = %session.attempt_id(),
            learner = %session.context().learner_id,
            course = %session.context().course_id,
            questions = session.questions().len(),
            "assessment attempt begun"
        );
        Ok(session)
    }

    /// Hand a completed result to the result store.
    pub async fn persist(&self, result: &AssessmentResult) -> Result<(), AssessmentError> {
        self.results.save(result).await.map_err(|e| {
            tracing::warn!(
                assessment = %result.assessment_id,
                recoverable = e.is_recoverable(),
                "failed to persist assessment result: {e}"
            );
            AssessmentError::from(e)
        })
    }

    /// Build the personalized path for a course and level.
    pub async fn learning_path(
        &self,
        course_id: &str,
        level: Level,
        concept_scores: &ConceptScores,
    ) -> Result<LearningPath, AssessmentError> {
        let Some((descriptor, modules)) = self.catalog.path(course_id, level).await? else {
            return Err(AssessmentError::NoPathAvailable {
                course_id: course_id.to_string(),
                level,
            });
        };
        build_path(descriptor, concept_scores, modules)
    }

    /// Path for a freshly completed result.
    pub async fn path_for(&self, result: &AssessmentResult) -> Result<LearningPath, AssessmentError> {
        self.learning_path(&result.course_id, result.level, &result.concept_scores)
            .await
    }

    /// The learner's most recent stored result for a course, if any.
    pub async fn latest_result(
        &self,
        learner_id: &str,
        course_id: &str,
    ) -> Result<Option<AssessmentResult>, AssessmentError> {
        let history = self.results.history(learner_id, course_id).await?;
        Ok(history.into_iter().max_by_key(|r| r.created_at))
    }

    /// Path personalized from the learner's latest stored result.
    ///
    /// Returns `Ok(None)` when the learner has no stored result for the course.
    pub async fn latest_path(
        &self,
        learner_id: &str,
        course_id: &str,
    ) -> Result<Option<LearningPath>, AssessmentError> {
        match self.latest_result(learner_id, course_id).await? {
            Some(result) => Ok(Some(self.path_for(&result).await?)),
            None => Ok(None),
        }
    }
}
