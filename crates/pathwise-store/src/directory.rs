//! Directory-backed question and catalog store.
//!
//! Question banks and catalog paths are TOML files loaded once at open time
//! and served from memory afterwards.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use pathwise_core::model::{LearningModule, Level, PathDescriptor, Question};
use pathwise_core::parser::{self, CatalogPath};
use pathwise_core::traits::{CatalogStore, QuestionStore};
use pathwise_core::StoreError;

/// Read-only store over directories of question banks and catalog paths.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    questions: HashMap<String, Vec<Question>>,
    paths: HashMap<(String, Level), CatalogPath>,
}

impl DirectoryStore {
    /// Load every bank under `questions_dir` and every path under `catalog_dir`.
    ///
    /// Banks for the same course are merged. A later catalog file for an
    /// already-seen (course, level) pair replaces the earlier one.
    pub fn open(questions_dir: &Path, catalog_dir: &Path) -> Result<Self> {
        let mut store = Self::default();

        if questions_dir.is_dir() {
            for bank in parser::load_assessment_directory(questions_dir)? {
                store.add_questions(&bank.course_id, bank.questions);
            }
        } else {
            tracing::warn!("question directory {} not found", questions_dir.display());
        }

        if catalog_dir.is_dir() {
            for catalog in parser::load_catalog_directory(catalog_dir)? {
                store.add_path(catalog);
            }
        } else {
            tracing::warn!("catalog directory {} not found", catalog_dir.display());
        }

        tracing::debug!(
            courses = store.questions.len(),
            paths = store.paths.len(),
            "opened directory store"
        );
        Ok(store)
    }

    /// Open only a catalog directory.
    pub fn open_catalog(catalog_dir: &Path) -> Result<Self> {
        let mut store = Self::default();
        for catalog in parser::load_catalog_directory(catalog_dir)? {
            store.add_path(catalog);
        }
        Ok(store)
    }

    pub fn add_questions(&mut self, course_id: &str, questions: Vec<Question>) {
        self.questions
            .entry(course_id.to_string())
            .or_default()
            .extend(questions);
    }

    pub fn add_path(&mut self, catalog: CatalogPath) {
        let key = (
            catalog.descriptor.course_id.clone(),
            catalog.descriptor.level,
        );
        if self.paths.insert(key, catalog).is_some() {
            tracing::warn!("duplicate catalog path replaced an earlier one");
        }
    }

    /// Course ids that have at least one question.
    pub fn courses(&self) -> Vec<&str> {
        let mut courses: Vec<_> = self.questions.keys().map(String::as_str).collect();
        courses.sort_unstable();
        courses
    }
}

#[async_trait]
impl QuestionStore for DirectoryStore {
    async fn questions(&self, course_id: &str) -> Result<Vec<Question>, StoreError> {
        let mut questions = self.questions.get(course_id).cloned().unwrap_or_default();
        questions.sort_by_key(|q| q.difficulty);
        Ok(questions)
    }
}

#[async_trait]
impl CatalogStore for DirectoryStore {
    async fn path(
        &self,
        course_id: &str,
        level: Level,
    ) -> Result<Option<(PathDescriptor, Vec<LearningModule>)>, StoreError> {
        Ok(self
            .paths
            .get(&(course_id.to_string(), level))
            .map(|c| (c.descriptor.clone(), c.modules.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"
[assessment]
id = "loops-diagnostic"
title = "Loops"
course_id = "intro-programming"

[[questions]]
id = "q-adv"
text = "Which loop never terminates?"
correct_answer = "loop {}"
difficulty = "advanced"
concept_tag = "loops"

[[questions]]
id = "q-beg"
text = "Keyword to declare a variable?"
correct_answer = "let"
difficulty = "beginner"
concept_tag = "variables"
"#;

    const PATH: &str = r#"
[path]
id = "intro-programming-beginner"
course_id = "intro-programming"
level = "beginner"

[[modules]]
id = "m1"
title = "Variables"
estimated_minutes = 15
concepts = ["variables"]
sequence = 1
"#;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("questions")).unwrap();
        std::fs::create_dir_all(dir.path().join("catalogs")).unwrap();
        std::fs::write(dir.path().join("questions/loops.toml"), BANK).unwrap();
        std::fs::write(dir.path().join("catalogs/beginner.toml"), PATH).unwrap();
        dir
    }

    #[tokio::test]
    async fn serves_loaded_questions_by_difficulty() {
        let dir = fixture();
        let store =
            DirectoryStore::open(&dir.path().join("questions"), &dir.path().join("catalogs"))
                .unwrap();
        assert_eq!(store.courses(), vec!["intro-programming"]);

        let questions = store.questions("intro-programming").await.unwrap();
        assert_eq!(questions[0].id, "q-beg");
        assert_eq!(questions[1].id, "q-adv");
    }

    #[tokio::test]
    async fn serves_catalog_paths() {
        let dir = fixture();
        let store = DirectoryStore::open_catalog(&dir.path().join("catalogs")).unwrap();

        let (descriptor, modules) = store
            .path("intro-programming", Level::Beginner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.id, "intro-programming-beginner");
        assert_eq!(modules.len(), 1);
        assert!(store
            .path("intro-programming", Level::Advanced)
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn missing_directories_open_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DirectoryStore::open(&dir.path().join("nope"), &dir.path().join("nada")).unwrap();
        assert!(store.courses().is_empty());
    }
}
