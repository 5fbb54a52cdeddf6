//! Assessment attempt state machine.
//!
//! `NotStarted -> InProgress -> Completed`. Completing an attempt scores the
//! recorded answers, classifies the score and builds the result in one step.
//! Once completed, the attempt rejects further answers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::level::classify;
use crate::model::{Answer, AssessmentResult, LearnerContext, Question};
use crate::recorder::AnswerRecorder;
use crate::result;
use crate::scoring::{self, ScoreCard};

/// Where an attempt currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NotStarted,
    /// Presenting the question at `index`.
    InProgress { index: usize },
    Completed,
}

/// One learner's attempt at an assessment.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    attempt_id: Uuid,
    context: LearnerContext,
    questions: Vec<Question>,
    answers: AnswerRecorder,
    state: SessionState,
    outcome: Option<(ScoreCard, AssessmentResult)>,
}

impl AssessmentSession {
    /// Create an attempt over `questions`.
    ///
    /// A zero-length question set is a configuration error.
    pub fn new(context: LearnerContext, questions: Vec<Question>) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::EmptyQuestionSet);
        }
        Ok(Self {
            attempt_id: Uuid::new_v4(),
            context,
            questions,
            answers: AnswerRecorder::new(),
            state: SessionState::NotStarted,
            outcome: None,
        })
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn context(&self) -> &LearnerContext {
        &self.context
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerRecorder {
        &self.answers
    }

    /// Present the first question. Has no effect while in progress.
    pub fn start(&mut self) -> Result<&Question, AssessmentError> {
        match self.state {
            SessionState::NotStarted => {
                tracing::debug!(attempt = %self.attempt_id, course = %self.context.course_id, "attempt started");
                self.state = SessionState::InProgress { index: 0 };
                Ok(&self.questions[0])
            }
            SessionState::InProgress { index } => Ok(&self.questions[index]),
            SessionState::Completed => Err(AssessmentError::AttemptCompleted),
        }
    }

    fn current_index(&self) -> Result<usize, AssessmentError> {
        match self.state {
            SessionState::NotStarted => Err(AssessmentError::NotStarted),
            SessionState::InProgress { index } => Ok(index),
            SessionState::Completed => Err(AssessmentError::AttemptCompleted),
        }
    }

    /// The question currently presented.
    pub fn current(&self) -> Result<&Question, AssessmentError> {
        let index = self.current_index()?;
        Ok(&self.questions[index])
    }

    /// Answer the current question, replacing any earlier answer.
    pub fn submit(&mut self, answer: Answer) -> Result<(), AssessmentError> {
        let index = self.current_index()?;
        let id = self.questions[index].id.clone();
        self.answers.record(id, answer);
        Ok(())
    }

    /// Answer any question by id.
    pub fn record(&mut self, question_id: &str, answer: Answer) -> Result<(), AssessmentError> {
        self.current_index()?;
        self.answers.record(question_id, answer);
        Ok(())
    }

    /// Move to the next question, completing the attempt after the last one.
    ///
    /// Returns the result when this call completed the attempt.
    pub fn advance_at(&mut self, now: DateTime<Utc>) -> Result<Option<&AssessmentResult>, AssessmentError> {
        let index = self.current_index()?;
        let question = &self.questions[index];
        if !self.answers.is_answered(&question.id) {
            return Err(AssessmentError::AnswerRequired(question.id.clone()));
        }

        if index + 1 < self.questions.len() {
            self.state = SessionState::InProgress { index: index + 1 };
            return Ok(None);
        }

        let card = scoring::score(&self.questions, &self.answers)?;
        let level = classify(card.score);
        let built = result::build(
            &self.context.learner_id,
            &self.context.course_id,
            card.score,
            level,
            card.concept_scores(),
            now,
        );
        tracing::info!(
            attempt = %self.attempt_id,
            assessment = %built.assessment_id,
            score = built.score,
            %level,
            "attempt completed"
        );

        self.state = SessionState::Completed;
        Ok(Some(&self.outcome.insert((card, built)).1))
    }

    /// [`advance_at`](Self::advance_at) using the current time.
    pub fn advance(&mut self) -> Result<Option<&AssessmentResult>, AssessmentError> {
        self.advance_at(Utc::now())
    }

    /// Position of the current question and the total count.
    ///
    /// A completed attempt reports `(total, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        match self.state {
            SessionState::NotStarted => (0, total),
            SessionState::InProgress { index } => (index, total),
            SessionState::Completed => (total, total),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// The result of a completed attempt.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.outcome.as_ref().map(|(_, result)| result)
    }

    /// The score card of a completed attempt.
    pub fn score_card(&self) -> Option<&ScoreCard> {
        self.outcome.as_ref().map(|(card, _)| card)
    }

    /// Consume a completed attempt, yielding its result.
    pub fn into_result(self) -> Option<AssessmentResult> {
        self.outcome.map(|(_, result)| result)
    }
}
