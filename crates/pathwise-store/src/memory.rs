//! In-memory store for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use pathwise_core::model::{AssessmentResult, LearningModule, Level, PathDescriptor, Question};
use pathwise_core::traits::{CatalogStore, QuestionStore, ResultStore};
use pathwise_core::StoreError;

type PathKey = (String, Level);

/// A store that keeps questions, catalogs and results in memory.
///
/// Result writes can be made to fail, to exercise persistence error paths.
#[derive(Default)]
pub struct MemoryStore {
    questions: Mutex<HashMap<String, Vec<Question>>>,
    paths: Mutex<HashMap<PathKey, (PathDescriptor, Vec<LearningModule>)>>,
    results: Mutex<Vec<AssessmentResult>>,
    fail_saves: AtomicBool,
    save_count: AtomicU32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the question set for a course.
    pub fn with_questions(self, course_id: &str, questions: Vec<Question>) -> Self {
        lock(&self.questions).insert(course_id.to_string(), questions);
        self
    }

    /// Register a catalog path.
    pub fn with_path(self, descriptor: PathDescriptor, modules: Vec<LearningModule>) -> Self {
        lock(&self.paths).insert(
            (descriptor.course_id.clone(), descriptor.level),
            (descriptor, modules),
        );
        self
    }

    /// Register modules for a course, one generated path per difficulty tier.
    ///
    /// Each module lands in the path matching its own difficulty.
    pub fn with_modules(self, course_id: &str, modules: Vec<LearningModule>) -> Self {
        {
            let mut paths = lock(&self.paths);
            for module in modules {
                let level = module.difficulty;
                paths
                    .entry((course_id.to_string(), level))
                    .or_insert_with(|| (generated_descriptor(course_id, level), Vec::new()))
                    .1
                    .push(module);
            }
        }
        self
    }

    /// Make every subsequent `save` fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Number of `save` calls made, including failed ones.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// All stored results.
    pub fn results(&self) -> Vec<AssessmentResult> {
        lock(&self.results).clone()
    }
}

fn generated_descriptor(course_id: &str, level: Level) -> PathDescriptor {
    PathDescriptor {
        id: format!("{course_id}-{level}"),
        course_id: course_id.to_string(),
        level,
        description: format!("A personalized {level} learning path for the course."),
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn questions(&self, course_id: &str) -> Result<Vec<Question>, StoreError> {
        let mut questions = lock(&self.questions)
            .get(course_id)
            .cloned()
            .unwrap_or_default();
        questions.sort_by_key(|q| q.difficulty);
        Ok(questions)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn path(
        &self,
        course_id: &str,
        level: Level,
    ) -> Result<Option<(PathDescriptor, Vec<LearningModule>)>, StoreError> {
        let found = lock(&self.paths)
            .get(&(course_id.to_string(), level))
            .cloned();
        Ok(found.map(|(descriptor, mut modules)| {
            modules.sort_by_key(|m| m.sequence);
            (descriptor, modules)
        }))
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn save(&self, result: &AssessmentResult) -> Result<(), StoreError> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable {
                store: "result",
                message: "writes disabled".into(),
            });
        }
        lock(&self.results).push(result.clone());
        Ok(())
    }

    async fn history(
        &self,
        learner_id: &str,
        course_id: &str,
    ) -> Result<Vec<AssessmentResult>, StoreError> {
        let mut history: Vec<_> = lock(&self.results)
            .iter()
            .filter(|r| r.learner_id == learner_id && r.course_id == course_id)
            .cloned()
            .collect();
        history.sort_by_key(|r| r.created_at);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pathwise_core::model::{Answer, ConceptScores};

    fn module(id: &str, difficulty: Level, sequence: u32) -> LearningModule {
        LearningModule {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            content_url: None,
            estimated_minutes: 10,
            difficulty,
            prerequisites: vec![],
            concepts: vec!["x".into()],
            sequence,
        }
    }

    fn question(id: &str, difficulty: Level) -> Question {
        Question {
            id: id.into(),
            text: String::new(),
            options: vec![],
            correct_answer: Answer::single("a"),
            difficulty,
            concept_tag: "x".into(),
            explanation: None,
        }
    }

    #[tokio::test]
    async fn questions_come_back_easiest_first() {
        let store = MemoryStore::new().with_questions(
            "c",
            vec![
                question("hard", Level::Advanced),
                question("easy", Level::Beginner),
                question("mid", Level::Intermediate),
            ],
        );
        let ids: Vec<_> = store
            .questions("c")
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, vec!["easy", "mid", "hard"]);
        assert!(store.questions("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn modules_are_split_by_difficulty() {
        let store = MemoryStore::new().with_modules(
            "c",
            vec![
                module("b2", Level::Beginner, 2),
                module("a1", Level::Advanced, 1),
                module("b1", Level::Beginner, 1),
            ],
        );
        let (descriptor, modules) = store.path("c", Level::Beginner).await.unwrap().unwrap();
        assert_eq!(descriptor.id, "c-beginner");
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
        assert!(store.path("c", Level::Intermediate).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_saves_are_counted_and_not_stored() {
        let store = MemoryStore::new();
        let result = AssessmentResult {
            learner_id: "l".into(),
            assessment_id: "c-1".into(),
            course_id: "c".into(),
            score: 50.0,
            level: Level::Beginner,
            concept_scores: ConceptScores::new(),
            created_at: Utc.timestamp_millis_opt(1).unwrap(),
        };

        store.fail_saves(true);
        let err = store.save(&result).await.unwrap_err();
        assert!(err.is_recoverable());
        assert!(store.results().is_empty());

        store.fail_saves(false);
        store.save(&result).await.unwrap();
        assert_eq!(store.save_count(), 2);
        assert_eq!(store.history("l", "c").await.unwrap().len(), 1);
        assert!(store.history("other", "c").await.unwrap().is_empty());
    }
}
