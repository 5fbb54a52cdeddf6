//! The `pathwise path` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use pathwise_core::model::{AssessmentResult, LearningPath};
use pathwise_core::personalize::weak_concepts;
use pathwise_core::service::LearningService;
use pathwise_store::DirectoryStore;

/// Output format for a learning path
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum PathFormat {
    #[default]
    Table,
    Json,
}

pub struct PathArgs {
    pub course: String,
    pub catalog: Option<PathBuf>,
    pub result: Option<PathBuf>,
    pub learner: Option<String>,
    pub results_dir: Option<PathBuf>,
    pub format: PathFormat,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: PathArgs) -> Result<()> {
    let config = super::resolve_config(args.config.as_deref(), args.catalog, args.results_dir)?;
    let catalog = Arc::new(DirectoryStore::open_catalog(&config.catalog_dir)?);
    let results = Arc::new(config.result_store());
    let service = LearningService::new(catalog.clone(), catalog, results);

    let result = match (&args.result, &args.learner) {
        (Some(path), _) => AssessmentResult::load_json(path)?,
        (None, Some(learner)) => service
            .latest_result(learner, &args.course)
            .await?
            .with_context(|| {
                format!("no stored results for learner '{learner}' in course '{}'", args.course)
            })?,
        (None, None) => anyhow::bail!("either --result or --learner is required"),
    };

    anyhow::ensure!(
        result.course_id == args.course,
        "result {} belongs to course '{}', not '{}'",
        result.assessment_id,
        result.course_id,
        args.course
    );

    let path = service.path_for(&result).await?;

    match args.format {
        PathFormat::Json => println!("{}", serde_json::to_string_pretty(&path)?),
        PathFormat::Table => print_table(&path, &result),
    }

    Ok(())
}

fn print_table(path: &LearningPath, result: &AssessmentResult) {
    let weak = weak_concepts(&result.concept_scores);

    println!("Learning path: {} ({} level)", path.id, path.level);
    if !path.description.is_empty() {
        println!("{}", path.description);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Module", "Minutes", "Concepts", "Focus"]);
    for (index, module) in path.modules.iter().enumerate() {
        let focus: Vec<&str> = module
            .concepts
            .iter()
            .map(String::as_str)
            .filter(|c| weak.contains(c))
            .collect();
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&module.title),
            Cell::new(module.estimated_minutes),
            Cell::new(module.concepts.join(", ")),
            Cell::new(focus.join(", ")),
        ]);
    }
    println!("{table}");
    println!(
        "{} modules, about {} minutes",
        path.modules.len(),
        path.total_minutes()
    );
}
