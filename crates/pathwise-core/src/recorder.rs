//! In-progress answers for a single assessment attempt.

use std::collections::HashMap;

use crate::model::Answer;

/// Holds the latest answer per question for one attempt.
///
/// No shape validation happens here; an answer of the wrong shape is
/// simply scored as incorrect.
#[derive(Debug, Clone, Default)]
pub struct AnswerRecorder {
    answers: HashMap<String, Answer>,
}

impl AnswerRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the answer for `question_id`, replacing any earlier one.
    pub fn record(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.answers.insert(question_id.into(), answer);
    }

    /// The current answer, or `None` if the question is unanswered.
    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Whether `question_id` has a non-blank answer.
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(|answer| !answer.is_blank())
    }

    /// Number of recorded answers, blank ones included.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(String, Answer)> for AnswerRecorder {
    fn from_iter<T: IntoIterator<Item = (String, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
