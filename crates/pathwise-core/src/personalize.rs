//! Learning-path personalization.
//!
//! Modules that teach a weak concept move to the front of the path. Within
//! the prioritized and the remaining group, catalog `sequence` order holds.

use std::collections::BTreeSet;

use crate::error::AssessmentError;
use crate::model::{ConceptScores, LearningModule, LearningPath, Level, PathDescriptor};

/// Concepts with mastery below this percentage are weak.
pub const MASTERY_THRESHOLD: f64 = 70.0;

/// Concept tags whose mastery is below [`MASTERY_THRESHOLD`].
///
/// Concepts absent from `concept_scores` are never weak.
pub fn weak_concepts(concept_scores: &ConceptScores) -> BTreeSet<&str> {
    concept_scores
        .iter()
        .filter(|(_, mastery)| **mastery < MASTERY_THRESHOLD)
        .map(|(tag, _)| tag.as_str())
        .collect()
}

fn is_prioritized(module: &LearningModule, weak: &BTreeSet<&str>) -> bool {
    module.concepts.iter().any(|c| weak.contains(c.as_str()))
}

/// Reorder `catalog` so modules addressing weak concepts come first.
///
/// The result is a permutation of `catalog`. The sort is a stable partition
/// keyed on `sequence`: the number of weak concepts a module covers does not
/// affect its position within its group. An empty catalog is reported as
/// [`AssessmentError::NoPathAvailable`].
pub fn personalize(
    course_id: &str,
    level: Level,
    concept_scores: &ConceptScores,
    catalog: Vec<LearningModule>,
) -> Result<Vec<LearningModule>, AssessmentError> {
    if catalog.is_empty() {
        return Err(AssessmentError::NoPathAvailable {
            course_id: course_id.to_string(),
            level,
        });
    }

    let weak = weak_concepts(concept_scores);
    let mut modules = catalog;
    modules.sort_by_key(|m| (!is_prioritized(m, &weak), m.sequence));

    tracing::debug!(
        course_id,
        %level,
        weak = ?weak,
        order = ?modules.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
        "personalized learning path"
    );

    Ok(modules)
}

/// Personalize a catalog path into a [`LearningPath`].
pub fn build_path(
    descriptor: PathDescriptor,
    concept_scores: &ConceptScores,
    catalog: Vec<LearningModule>,
) -> Result<LearningPath, AssessmentError> {
    let modules = personalize(
        &descriptor.course_id,
        descriptor.level,
        concept_scores,
        catalog,
    )?;
    Ok(LearningPath {
        id: descriptor.id,
        course_id: descriptor.course_id,
        level: descriptor.level,
        description: descriptor.description,
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(id: &str, sequence: u32, concepts: &[&str]) -> LearningModule {
        LearningModule {
            id: id.into(),
            title: format!("Module {id}"),
            description: String::new(),
            content_url: None,
            estimated_minutes: 20,
            difficulty: Level::Beginner,
            prerequisites: vec![],
            concepts: concepts.iter().map(|c| c.to_string()).collect(),
            sequence,
        }
    }

    fn scores(pairs: &[(&str, f64)]) -> ConceptScores {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn ids(modules: &[LearningModule]) -> Vec<&str> {
        modules.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn weak_modules_first_with_relative_order_kept() {
        let catalog = vec![module("1", 1, &["a"]), module("2", 2, &["b"]), module("3", 3, &["a"])];
        let out = personalize("c", Level::Beginner, &scores(&[("a", 40.0), ("b", 90.0)]), catalog)
            .unwrap();
        assert_eq!(ids(&out), vec!["1", "3", "2"]);
    }

    #[test]
    fn more_weak_concepts_do_not_promote() {
        let catalog = vec![
            module("1", 1, &["ok"]),
            module("2", 2, &["a"]),
            module("3", 3, &["a", "b"]),
        ];
        let out = personalize(
            "c",
            Level::Beginner,
            &scores(&[("a", 10.0), ("b", 20.0), ("ok", 95.0)]),
            catalog,
        )
        .unwrap();
        assert_eq!(ids(&out), vec!["2", "3", "1"]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let catalog = vec![module("1", 1, &["x"]), module("2", 2, &["y"])];
        let out = personalize("c", Level::Beginner, &scores(&[("x", 70.0), ("y", 69.9)]), catalog)
            .unwrap();
        assert_eq!(ids(&out), vec!["2", "1"]);
    }

    #[test]
    fn unscored_concepts_are_not_weak() {
        let catalog = vec![module("1", 1, &["scored"]), module("2", 2, &["unscored"])];
        let out = personalize("c", Level::Beginner, &scores(&[("scored", 100.0)]), catalog).unwrap();
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn unsorted_catalog_is_ordered_by_sequence() {
        let catalog = vec![module("3", 3, &[]), module("1", 1, &[]), module("2", 2, &["w"])];
        let out = personalize("c", Level::Beginner, &scores(&[("w", 0.0)]), catalog).unwrap();
        assert_eq!(ids(&out), vec!["2", "1", "3"]);
    }

    #[test]
    fn output_is_a_permutation_and_deterministic() {
        let catalog: Vec<_> = (1..=8)
            .map(|i| module(&i.to_string(), i, if i % 3 == 0 { &["a"] } else { &["b"] }))
            .collect();
        let concepts = scores(&[("a", 30.0), ("b", 80.0)]);

        let first = personalize("c", Level::Beginner, &concepts, catalog.clone()).unwrap();
        let second = personalize("c", Level::Beginner, &concepts, catalog.clone()).unwrap();
        assert_eq!(first, second);

        let mut before: Vec<_> = ids(&catalog);
        let mut after: Vec<_> = ids(&first);
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_catalog_is_no_path() {
        let err = personalize("rust-101", Level::Advanced, &ConceptScores::new(), vec![]).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::NoPathAvailable { ref course_id, level: Level::Advanced } if course_id == "rust-101"
        ));
    }

    #[test]
    fn build_path_keeps_descriptor() {
        let descriptor = PathDescriptor {
            id: "rust-101-beginner".into(),
            course_id: "rust-101".into(),
            level: Level::Beginner,
            description: "Start here".into(),
        };
        let path = build_path(
            descriptor,
            &scores(&[("b", 10.0)]),
            vec![module("1", 1, &["a"]), module("2", 2, &["b"])],
        )
        .unwrap();
        assert_eq!(path.id, "rust-101-beginner");
        assert_eq!(path.description, "Start here");
        assert_eq!(ids(&path.modules), vec!["2", "1"]);
    }
}
