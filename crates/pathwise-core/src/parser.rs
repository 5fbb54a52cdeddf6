//! TOML question-bank and catalog parser.
//!
//! Loads assessments and catalog paths from TOML files and directories, and
//! validates them for authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Answer, Assessment, LearningModule, Level, PathDescriptor, Question};

// ---------------------------------------------------------------------------
// Question banks
// ---------------------------------------------------------------------------

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    id: String,
    title: String,
    course_id: String,
    #[serde(default)]
    adaptive: bool,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: Answer,
    #[serde(default = "default_level_str")]
    difficulty: String,
    concept_tag: String,
    #[serde(default)]
    explanation: Option<String>,
}

fn default_level_str() -> String {
    "beginner".to_string()
}

fn parse_level(s: &str) -> Result<Level> {
    s.parse().map_err(|e: String| anyhow::anyhow!("{}", e))
}

/// Parse a single TOML question bank file.
pub fn parse_assessment(path: &Path) -> Result<Assessment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_assessment_str(&content, path)
}

/// Parse a TOML string into an [`Assessment`].
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<Assessment> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty = parse_level(&q.difficulty)
                .with_context(|| format!("question '{}'", q.id))?;
            Ok(Question {
                id: q.id,
                text: q.text,
                options: q.options,
                correct_answer: q.correct_answer,
                difficulty,
                concept_tag: q.concept_tag,
                explanation: q.explanation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Assessment {
        id: parsed.assessment.id,
        title: parsed.assessment.title,
        course_id: parsed.assessment.course_id,
        questions,
        adaptive: parsed.assessment.adaptive,
    })
}

// ---------------------------------------------------------------------------
// Catalog paths
// ---------------------------------------------------------------------------

/// A catalog path file: header plus its modules.
#[derive(Debug, Clone)]
pub struct CatalogPath {
    pub descriptor: PathDescriptor,
    pub modules: Vec<LearningModule>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    path: TomlPathHeader,
    #[serde(default)]
    modules: Vec<TomlModule>,
}

#[derive(Debug, Deserialize)]
struct TomlPathHeader {
    id: String,
    course_id: String,
    level: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlModule {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    content_url: Option<String>,
    estimated_minutes: u32,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    concepts: Vec<String>,
    sequence: u32,
}

/// Parse a single TOML catalog path file.
pub fn parse_catalog(path: &Path) -> Result<CatalogPath> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a [`CatalogPath`].
///
/// Modules without a difficulty inherit the path level. Modules come back
/// ordered by `sequence`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<CatalogPath> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let level = parse_level(&parsed.path.level)?;

    let mut modules = parsed
        .modules
        .into_iter()
        .map(|m| {
            let difficulty = match m.difficulty {
                Some(d) => parse_level(&d).with_context(|| format!("module '{}'", m.id))?,
                None => level,
            };
            Ok(LearningModule {
                id: m.id,
                title: m.title,
                description: m.description,
                content_url: m.content_url,
                estimated_minutes: m.estimated_minutes,
                difficulty,
                prerequisites: m.prerequisites,
                concepts: m.concepts,
                sequence: m.sequence,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    modules.sort_by_key(|m| m.sequence);

    Ok(CatalogPath {
        descriptor: PathDescriptor {
            id: parsed.path.id,
            course_id: parsed.path.course_id,
            level,
            description: parsed.path.description,
        },
        modules,
    })
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

fn load_directory<T>(dir: &Path, parse: fn(&Path) -> Result<T>) -> Result<Vec<T>> {
    let mut items = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            items.extend(load_directory(&path, parse)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse(&path) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(items)
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_assessment_directory(dir: &Path) -> Result<Vec<Assessment>> {
    load_directory(dir, parse_assessment)
}

/// Recursively load all `.toml` catalog paths from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<CatalogPath>> {
    load_directory(dir, parse_catalog)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from bank or catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question or module id (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn item(id: &str, message: impl Into<String>) -> Self {
        Self {
            item_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a question bank for common issues.
pub fn validate_assessment(assessment: &Assessment) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if assessment.questions.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "assessment has no questions and cannot be scored".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for q in &assessment.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::item(&q.id, format!("duplicate question ID: {}", q.id)));
        }
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::item(&q.id, "prompt is empty"));
        }
        if q.concept_tag.trim().is_empty() {
            warnings.push(ValidationWarning::item(&q.id, "concept_tag is empty"));
        }
        match &q.correct_answer {
            Answer::Single(value) => {
                if !q.options.is_empty() && !q.options.contains(value) {
                    warnings.push(ValidationWarning::item(
                        &q.id,
                        format!("correct answer '{value}' is not one of the options"),
                    ));
                }
            }
            Answer::Set(values) => {
                if q.options.is_empty() {
                    warnings.push(ValidationWarning::item(
                        &q.id,
                        "set-valued answer on a question without options",
                    ));
                } else if let Some(missing) = values.iter().find(|v| !q.options.contains(*v)) {
                    warnings.push(ValidationWarning::item(
                        &q.id,
                        format!("correct answer '{missing}' is not one of the options"),
                    ));
                }
            }
        }
    }

    warnings
}

/// Validate a catalog path for common issues.
pub fn validate_catalog(catalog: &CatalogPath) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let level = catalog.descriptor.level;

    if catalog.modules.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "path has no modules".into(),
        });
    }

    let ids: HashSet<&str> = catalog.modules.iter().map(|m| m.id.as_str()).collect();
    let mut seen_ids = HashSet::new();
    let mut seen_sequences = HashSet::new();

    for m in &catalog.modules {
        if !seen_ids.insert(&m.id) {
            warnings.push(ValidationWarning::item(&m.id, format!("duplicate module ID: {}", m.id)));
        }
        if !seen_sequences.insert(m.sequence) {
            warnings.push(ValidationWarning::item(
                &m.id,
                format!("duplicate sequence number: {}", m.sequence),
            ));
        }
        if m.estimated_minutes == 0 {
            warnings.push(ValidationWarning::item(&m.id, "estimated_minutes must be greater than 0"));
        }
        if m.concepts.is_empty() {
            warnings.push(ValidationWarning::item(
                &m.id,
                "module lists no concepts and can never be prioritized",
            ));
        }
        if m.difficulty != level {
            warnings.push(ValidationWarning::item(
                &m.id,
                format!("module difficulty {} differs from path level {level}", m.difficulty),
            ));
        }
        for prereq in &m.prerequisites {
            if !ids.contains(prereq.as_str()) {
                warnings.push(ValidationWarning::item(
                    &m.id,
                    format!("unknown prerequisite: {prereq}"),
                ));
            }
        }
    }

    warnings
}
