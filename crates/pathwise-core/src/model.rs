//! Core data model types for pathwise.
//!
//! These are the fundamental types shared by the scorer, the personalizer
//! and the store adapters: questions, answers, results, modules and paths.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proficiency level, also used as the difficulty tier of questions and modules.
///
/// Variants are declared in ascending order so `Ord` sorts beginner first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => write!(f, "beginner"),
            Level::Intermediate => write!(f, "intermediate"),
            Level::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// A submitted or expected answer.
///
/// Serialized untagged: a plain string is a single answer, an array of
/// strings is a set answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Set(Vec<String>),
}

impl Answer {
    pub fn single(value: impl Into<String>) -> Self {
        Answer::Single(value.into())
    }

    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Answer::Set(values.into_iter().map(Into::into).collect())
    }

    /// An empty string or an empty set. Blank answers do not count as answered.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Single(value) => value.is_empty(),
            Answer::Set(values) => values.is_empty(),
        }
    }

    /// Whether `submitted` matches `self` taken as the expected answer.
    ///
    /// Sets compare as sets (order and duplicates ignored, no partial credit).
    /// Singles compare exactly. Mismatched shapes never match.
    pub fn accepts(&self, submitted: &Answer) -> bool {
        match (self, submitted) {
            (Answer::Single(expected), Answer::Single(given)) => expected == given,
            (Answer::Set(expected), Answer::Set(given)) => {
                let expected: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
                let given: BTreeSet<&str> = given.iter().map(String::as_str).collect();
                expected == given
            }
            _ => false,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Single(value) => write!(f, "{value}"),
            Answer::Set(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// A single diagnostic question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within an assessment.
    pub id: String,
    /// Prompt shown to the learner.
    pub text: String,
    /// Selectable options, if the question is multiple choice.
    #[serde(default)]
    pub options: Vec<String>,
    /// The correct answer.
    pub correct_answer: Answer,
    /// Difficulty tier.
    pub difficulty: Level,
    /// Skill this question measures.
    pub concept_tag: String,
    /// Shown after the attempt completes.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A diagnostic assessment for one course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub title: String,
    pub course_id: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Carried through from authored banks; scoring ignores it.
    #[serde(default)]
    pub adaptive: bool,
}

/// Mastery percentage per concept tag.
pub type ConceptScores = BTreeMap<String, f64>;

/// The immutable record of a completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub learner_id: String,
    pub assessment_id: String,
    pub course_id: String,
    /// Overall score in `[0, 100]`.
    pub score: f64,
    pub level: Level,
    pub concept_scores: ConceptScores,
    pub created_at: DateTime<Utc>,
}

/// An instructional module from a course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_url: Option<String>,
    /// Estimated duration in minutes.
    pub estimated_minutes: u32,
    pub difficulty: Level,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Concept tags this module teaches.
    #[serde(default)]
    pub concepts: Vec<String>,
    /// Catalog-defined base order, unique within a path.
    pub sequence: u32,
}

/// Header of a catalog path, without its modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDescriptor {
    pub id: String,
    pub course_id: String,
    pub level: Level,
    #[serde(default)]
    pub description: String,
}

/// A personalized learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub id: String,
    pub course_id: String,
    pub level: Level,
    pub description: String,
    /// Modules in personalized order.
    pub modules: Vec<LearningModule>,
}

impl LearningPath {
    /// Sum of the estimated durations of every module.
    pub fn total_minutes(&self) -> u32 {
        self.modules.iter().map(|m| m.estimated_minutes).sum()
    }
}

/// Who is taking an assessment, and for which course.
///
/// Passed explicitly into sessions and services; nothing in the core reads
/// ambient learner state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerContext {
    pub learner_id: String,
    pub course_id: String,
}

impl LearnerContext {
    pub fn new(learner_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            course_id: course_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_display_and_parse() {
        assert_eq!(Level::Beginner.to_string(), "beginner");
        assert_eq!(Level::Advanced.to_string(), "advanced");
        assert_eq!("Intermediate".parse::<Level>().unwrap(), Level::Intermediate);
        assert_eq!("ADVANCED".parse::<Level>().unwrap(), Level::Advanced);
        assert!("expert".parse::<Level>().is_err());
    }

    #[test]
    fn level_orders_ascending() {
        assert!(Level::Beginner < Level::Intermediate);
        assert!(Level::Intermediate < Level::Advanced);
    }

    #[test]
    fn answer_deserializes_untagged() {
        let single: Answer = serde_json::from_str(r#""b""#).unwrap();
        assert_eq!(single, Answer::single("b"));
        let set: Answer = serde_json::from_str(r#"["a", "c"]"#).unwrap();
        assert_eq!(set, Answer::set(["a", "c"]));
    }

    #[test]
    fn set_answers_ignore_order() {
        let expected = Answer::set(["a", "b", "c"]);
        assert!(expected.accepts(&Answer::set(["c", "a", "b"])));
        assert!(!expected.accepts(&Answer::set(["a", "b"])));
        assert!(!expected.accepts(&Answer::set(["a", "b", "c", "d"])));
    }

    #[test]
    fn single_answers_are_exact() {
        let expected = Answer::single("Paris");
        assert!(expected.accepts(&Answer::single("Paris")));
        assert!(!expected.accepts(&Answer::single("paris")));
        assert!(!expected.accepts(&Answer::single(" Paris")));
    }

    #[test]
    fn blank_answers() {
        assert!(Answer::single("").is_blank());
        assert!(Answer::Set(vec![]).is_blank());
        assert!(!Answer::single(" ").is_blank());
        assert!(!Answer::set([""]).is_blank());
    }

    #[test]
    fn shape_mismatch_is_not_accepted() {
        assert!(!Answer::single("a").accepts(&Answer::set(["a"])));
        assert!(!Answer::set(["a"]).accepts(&Answer::single("a")));
    }

    #[test]
    fn path_total_minutes() {
        let module = |id: &str, minutes| LearningModule {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            content_url: None,
            estimated_minutes: minutes,
            difficulty: Level::Beginner,
            prerequisites: vec![],
            concepts: vec![],
            sequence: 1,
        };
        let path = LearningPath {
            id: "p".into(),
            course_id: "c".into(),
            level: Level::Beginner,
            description: String::new(),
            modules: vec![module("a", 15), module("b", 25)],
        };
        assert_eq!(path.total_minutes(), 40);
    }
}
