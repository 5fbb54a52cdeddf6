//! The `pathwise score` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use pathwise_core::level::classify;
use pathwise_core::model::{Answer, Assessment, AssessmentResult};
use pathwise_core::parser;
use pathwise_core::personalize::MASTERY_THRESHOLD;
use pathwise_core::recorder::AnswerRecorder;
use pathwise_core::result;
use pathwise_core::scoring::{self, ScoreCard};
use pathwise_core::traits::ResultStore;

/// Output format for a scored result
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ScoreFormat {
    /// Summary, concept table and missed questions
    #[default]
    Text,
    /// The result record as JSON
    Json,
    /// Markdown summary
    #[value(alias = "md")]
    Markdown,
}

pub struct ScoreArgs {
    pub bank: PathBuf,
    pub answers: PathBuf,
    pub learner: String,
    pub results_dir: Option<PathBuf>,
    pub format: ScoreFormat,
    pub no_save: bool,
    pub config: Option<PathBuf>,
}

fn load_answers(path: &Path) -> Result<HashMap<String, Answer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

pub async fn execute(args: ScoreArgs) -> Result<()> {
    let bank = parser::parse_assessment(&args.bank)?;
    let answers = load_answers(&args.answers)?;

    for id in answers.keys() {
        if !bank.questions.iter().any(|q| &q.id == id) {
            tracing::warn!("answer for unknown question '{id}' ignored");
        }
    }

    let recorder: AnswerRecorder = answers.into_iter().collect();
    let card = scoring::score(&bank.questions, &recorder)
        .with_context(|| format!("cannot score question bank {}", args.bank.display()))?;
    let level = classify(card.score);
    let result = result::build(
        &args.learner,
        &bank.course_id,
        card.score,
        level,
        card.concept_scores(),
        chrono::Utc::now(),
    );

    match args.format {
        ScoreFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        ScoreFormat::Markdown => println!("{}", result.to_markdown()),
        ScoreFormat::Text => print_text(&bank, &card, &result, &recorder),
    }

    if args.no_save {
        return Ok(());
    }

    let config = super::resolve_config(args.config.as_deref(), None, args.results_dir)?;
    let store = config.result_store();
    store
        .save(&result)
        .await
        .with_context(|| format!("failed to save result {}", result.assessment_id))?;
    eprintln!("Saved result to {}", store.result_path(&result).display());

    Ok(())
}

fn print_text(bank: &Assessment, card: &ScoreCard, result: &AssessmentResult, answers: &AnswerRecorder) {
    println!("Assessment: {} [{}]", bank.title, bank.course_id);
    println!(
        "Score: {:.0}% ({}/{} correct)",
        result.score.round(),
        card.correct,
        card.total
    );
    println!("Level: {}", result.level);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concept", "Correct", "Mastery", ""]);
    for (concept, acc) in &card.concept_accuracy {
        let mastery = acc.mastery().unwrap_or(0.0);
        let flag = if mastery < MASTERY_THRESHOLD {
            "needs practice"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(concept),
            Cell::new(format!("{}/{}", acc.correct, acc.total)),
            Cell::new(format!("{:.0}%", mastery.round())),
            Cell::new(flag),
        ]);
    }
    println!("{table}");

    if !card.missed.is_empty() {
        println!("\nMissed questions:");
        for question in bank.questions.iter().filter(|q| card.missed.contains(&q.id)) {
            let given = answers
                .get(&question.id)
                .map(|a| a.to_string())
                .unwrap_or_else(|| "(unanswered)".to_string());
            println!("  [{}] {}", question.id, question.text.trim());
            println!("      your answer: {given}; correct: {}", question.correct_answer);
            if let Some(explanation) = &question.explanation {
                println!("      {}", explanation.trim());
            }
        }
    }
}
