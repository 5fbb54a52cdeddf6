//! File-backed result store.
//!
//! Each result is a pretty-printed JSON file at
//! `<root>/<learner>/<assessment_id>.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::join_all;

use pathwise_core::model::AssessmentResult;
use pathwise_core::traits::ResultStore;
use pathwise_core::StoreError;

/// Stores results as JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    root: PathBuf,
}

/// Keep ids usable as a single path component.
fn path_component(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => format!("_{cleaned}"),
        _ => cleaned,
    }
}

impl FileResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn learner_dir(&self, learner_id: &str) -> PathBuf {
        self.root.join(path_component(learner_id))
    }

    /// Where `result` is (or would be) stored.
    pub fn result_path(&self, result: &AssessmentResult) -> PathBuf {
        self.learner_dir(&result.learner_id)
            .join(format!("{}.json", path_component(&result.assessment_id)))
    }

    async fn read_result(path: PathBuf) -> Result<AssessmentResult, StoreError> {
        let content = tokio::fs::read_to_string(&path).await?;
        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            id: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    /// Writes a sibling `.json.tmp` file and renames it into place.
    async fn save(&self, result: &AssessmentResult) -> Result<(), StoreError> {
        let path = self.result_path(result);
        let json = serde_json::to_string_pretty(result).map_err(|e| StoreError::Malformed {
            id: result.assessment_id.clone(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        tracing::debug!("saved result to {}", path.display());
        Ok(())
    }

    /// Files that cannot be read or decoded are skipped with a warning.
    async fn history(
        &self,
        learner_id: &str,
        course_id: &str,
    ) -> Result<Vec<AssessmentResult>, StoreError> {
        let dir = self.learner_dir(learner_id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        let mut history: Vec<_> = join_all(paths.into_iter().map(Self::read_result))
            .await
            .into_iter()
            .filter_map(|read| match read {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("skipping stored result: {e}");
                    None
                }
            })
            .filter(|r| r.course_id == course_id && r.learner_id == learner_id)
            .collect();
        history.sort_by_key(|r| r.created_at);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pathwise_core::model::{ConceptScores, Level};

    fn result(learner: &str, course: &str, millis: i64) -> AssessmentResult {
        let created_at = Utc.timestamp_millis_opt(millis).unwrap();
        pathwise_core::result::build(
            learner,
            course,
            75.0,
            Level::Intermediate,
            ConceptScores::from([("loops".to_string(), 50.0)]),
            created_at,
        )
    }

    #[test]
    fn path_components_are_sanitized() {
        assert_eq!(path_component("learner-1"), "learner-1");
        assert_eq!(path_component("../etc/passwd"), ".._etc_passwd");
        assert_eq!(path_component(".."), "_..");
        assert_eq!(path_component(""), "_");
    }

    #[tokio::test]
    async fn save_then_history_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResultStore::new(dir.path());

        store.save(&result("l1", "rust-101", 2_000)).await.unwrap();
        store.save(&result("l1", "rust-101", 1_000)).await.unwrap();
        store.save(&result("l1", "go-101", 3_000)).await.unwrap();
        store.save(&result("l2", "rust-101", 4_000)).await.unwrap();

        let history = store.history("l1", "rust-101").await.unwrap();
        let ids: Vec<_> = history.iter().map(|r| r.assessment_id.as_str()).collect();
        assert_eq!(ids, vec!["rust-101-1000", "rust-101-2000"]);
        assert!(dir.path().join("l1").join("rust-101-1000.json").exists());
    }

    #[tokio::test]
    async fn unknown_learner_has_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResultStore::new(dir.path());
        assert!(store.history("nobody", "rust-101").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileResultStore::read_result(path).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert!(!err.is_recoverable());
    }

    #[tokio::test]
    async fn corrupt_file_does_not_hide_other_results() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResultStore::new(dir.path());
        let saved = result("l1", "rust-101", 1_000);
        store.save(&saved).await.unwrap();

        // Truncated write from another course, plus a same-course leftover.
        std::fs::write(
            dir.path().join("l1").join("go-101-5.json"),
            r#"{"learner_id": "l1", "assess"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("l1").join("rust-101-9.json"), "").unwrap();

        let history = store.history("l1", "rust-101").await.unwrap();
        assert_eq!(history, vec![saved]);
        assert!(store.history("l1", "go-101").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResultStore::new(dir.path());
        let saved = result("l1", "rust-101", 1_000);
        store.save(&saved).await.unwrap();
        store.save(&saved).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path().join("l1"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["rust-101-1000.json"]);

        // A stray temporary file from an interrupted save is ignored.
        std::fs::write(dir.path().join("l1").join("rust-101-2000.json.tmp"), "{").unwrap();
        assert_eq!(store.history("l1", "rust-101").await.unwrap(), vec![saved]);
    }
}
