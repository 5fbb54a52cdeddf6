//! The `pathwise init` command.

use std::path::Path;

use anyhow::Result;

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("pathwise.toml"), SAMPLE_CONFIG)?;
    write_if_missing(
        Path::new("pathwise-data/questions/example.toml"),
        EXAMPLE_BANK,
    )?;
    write_if_missing(
        Path::new("pathwise-data/catalogs/example-beginner.toml"),
        EXAMPLE_CATALOG,
    )?;
    write_if_missing(
        Path::new("pathwise-data/answers/example.json"),
        EXAMPLE_ANSWERS,
    )?;

    println!("\nNext steps:");
    println!("  1. Run: pathwise validate --questions pathwise-data/questions --catalog pathwise-data/catalogs");
    println!("  2. Run: pathwise score --bank pathwise-data/questions/example.toml --answers pathwise-data/answers/example.json --learner me");
    println!("  3. Run: pathwise path --course example-course --learner me");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pathwise configuration

questions_dir = "./pathwise-data/questions"
catalog_dir = "./pathwise-data/catalogs"
results_dir = "./pathwise-data/results"
"#;

const EXAMPLE_BANK: &str = r#"[assessment]
id = "example-diagnostic"
title = "Example Placement"
course_id = "example-course"

[[questions]]
id = "q1"
text = "Pick the correct article: ___ apple"
options = ["a", "an", "the"]
correct_answer = "an"
difficulty = "beginner"
concept_tag = "grammar"
explanation = "Use 'an' before a vowel sound."

[[questions]]
id = "q2"
text = "Select every synonym of 'happy'"
options = ["glad", "sad", "joyful"]
correct_answer = ["glad", "joyful"]
difficulty = "beginner"
concept_tag = "vocab"
"#;

const EXAMPLE_CATALOG: &str = r#"[path]
id = "example-course-beginner"
course_id = "example-course"
level = "beginner"
description = "A starter path."

[[modules]]
id = "m1"
title = "Articles"
estimated_minutes = 15
concepts = ["grammar"]
sequence = 1

[[modules]]
id = "m2"
title = "Word Families"
estimated_minutes = 20
concepts = ["vocab"]
sequence = 2
"#;

const EXAMPLE_ANSWERS: &str = r#"{
  "q1": "a",
  "q2": ["joyful", "glad"]
}
"#;
