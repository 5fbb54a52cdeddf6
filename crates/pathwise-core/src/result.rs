//! Assessment result construction and JSON persistence.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::model::{AssessmentResult, ConceptScores, Level};
use crate::personalize::MASTERY_THRESHOLD;

/// Assessment id for an attempt: the course id joined with the attempt's
/// millisecond timestamp.
pub fn assessment_id(course_id: &str, at: DateTime<Utc>) -> String {
    format!("{course_id}-{}", at.timestamp_millis())
}

/// Assemble the immutable result record for a completed attempt.
pub fn build(
    learner_id: &str,
    course_id: &str,
    score: f64,
    level: Level,
    concept_scores: ConceptScores,
    now: DateTime<Utc>,
) -> AssessmentResult {
    AssessmentResult {
        learner_id: learner_id.to_string(),
        assessment_id: assessment_id(course_id, now),
        course_id: course_id.to_string(),
        score,
        level,
        concept_scores,
        created_at: now,
    }
}

impl AssessmentResult {
    /// Concept tags below the mastery threshold, in tag order.
    pub fn weak_concepts(&self) -> Vec<&str> {
        self.concept_scores
            .iter()
            .filter(|(_, mastery)| **mastery < MASTERY_THRESHOLD)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    /// Save the result as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: AssessmentResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// Format the result as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        let _ = writeln!(md, "## Assessment Results\n");
        let _ = writeln!(
            md,
            "**Score:** {:.0}%  **Level:** {}\n",
            self.score.round(),
            self.level
        );

        if !self.concept_scores.is_empty() {
            md.push_str("### Concept Breakdown\n\n");
            md.push_str("| Concept | Mastery | |\n");
            md.push_str("|---------|---------|---|\n");
            for (concept, mastery) in &self.concept_scores {
                let flag = if *mastery < MASTERY_THRESHOLD {
                    "needs practice"
                } else {
                    ""
                };
                let _ = writeln!(
                    md,
                    "| {} | {:.0}% | {} |",
                    concept.replace('_', " "),
                    mastery.round(),
                    flag
                );
            }
            md.push('\n');
        }

        let _ = writeln!(
            md,
            "Recommended path: **{}**. Modules for weaker concepts come first.",
            self.level
        );

        md
    }
}
