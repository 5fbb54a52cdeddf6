//! The `pathwise history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use pathwise_core::traits::ResultStore;

pub async fn execute(
    learner: String,
    course: String,
    results_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config_path.as_deref(), None, results_dir)?;
    let history = config.result_store().history(&learner, &course).await?;

    if history.is_empty() {
        println!("No results for learner '{learner}' in course '{course}'.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Assessment", "Taken", "Score", "Level", "Weak concepts"]);
    for result in &history {
        table.add_row(vec![
            Cell::new(&result.assessment_id),
            Cell::new(result.created_at.format("%Y-%m-%d %H:%M UTC")),
            Cell::new(format!("{:.0}%", result.score.round())),
            Cell::new(result.level),
            Cell::new(result.weak_concepts().join(", ")),
        ]);
    }
    println!("{table}");

    Ok(())
}
