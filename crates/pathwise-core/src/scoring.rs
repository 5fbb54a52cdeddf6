//! Answer scoring and per-concept accuracy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{ConceptScores, Question};
use crate::recorder::AnswerRecorder;

/// Correct and total counts for one concept tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptAccuracy {
    pub correct: usize,
    pub total: usize,
}

impl ConceptAccuracy {
    fn observe(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Mastery as a percentage; `None` when nothing was observed.
    pub fn mastery(&self) -> Option<f64> {
        (self.total > 0).then(|| 100.0 * self.correct as f64 / self.total as f64)
    }
}

/// Outcome of scoring one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Overall score in `[0, 100]`.
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    pub concept_accuracy: BTreeMap<String, ConceptAccuracy>,
    /// Ids of questions that were wrong or unanswered, in question order.
    pub missed: Vec<String>,
}

impl ScoreCard {
    /// Mastery percentage per concept tag.
    pub fn concept_scores(&self) -> ConceptScores {
        self.concept_accuracy
            .iter()
            .filter_map(|(tag, acc)| acc.mastery().map(|m| (tag.clone(), m)))
            .collect()
    }

    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

/// Whether the recorded answer to `question` is correct.
///
/// Unanswered questions are incorrect.
pub fn is_correct(question: &Question, answers: &AnswerRecorder) -> bool {
    answers
        .get(&question.id)
        .is_some_and(|answer| question.correct_answer.accepts(answer))
}

/// Score `answers` against `questions`.
///
/// Fails with [`AssessmentError::EmptyQuestionSet`] when `questions` is empty.
pub fn score(questions: &[Question], answers: &AnswerRecorder) -> Result<ScoreCard, AssessmentError> {
    if questions.is_empty() {
        return Err(AssessmentError::EmptyQuestionSet);
    }

    let mut correct = 0usize;
    let mut concept_accuracy: BTreeMap<String, ConceptAccuracy> = BTreeMap::new();
    let mut missed = Vec::new();

    for question in questions {
        let ok = is_correct(question, answers);
        if ok {
            correct += 1;
        } else {
            missed.push(question.id.clone());
        }
        concept_accuracy
            .entry(question.concept_tag.clone())
            .or_default()
            .observe(ok);
    }

    let total = questions.len();
    let score = 100.0 * correct as f64 / total as f64;

    tracing::debug!(correct, total, score, "scored attempt");

    Ok(ScoreCard {
        score,
        correct,
        total,
        concept_accuracy,
        missed,
    })
}
