//! The `pathwise validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use pathwise_core::parser::{self, ValidationWarning};

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}

fn validate_banks(path: &Path) -> Result<usize> {
    let banks = if path.is_dir() {
        parser::load_assessment_directory(path)?
    } else {
        vec![parser::parse_assessment(path)?]
    };

    let mut total = 0;
    for bank in &banks {
        println!(
            "Question bank: {} [{}] ({} questions)",
            bank.title,
            bank.course_id,
            bank.questions.len()
        );
        let warnings = parser::validate_assessment(bank);
        print_warnings(&warnings);
        total += warnings.len();
    }
    Ok(total)
}

fn validate_catalogs(path: &Path) -> Result<usize> {
    let catalogs = if path.is_dir() {
        parser::load_catalog_directory(path)?
    } else {
        vec![parser::parse_catalog(path)?]
    };

    let mut total = 0;
    for catalog in &catalogs {
        println!(
            "Catalog path: {} [{} / {}] ({} modules)",
            catalog.descriptor.id,
            catalog.descriptor.course_id,
            catalog.descriptor.level,
            catalog.modules.len()
        );
        let warnings = parser::validate_catalog(catalog);
        print_warnings(&warnings);
        total += warnings.len();
    }
    Ok(total)
}

pub fn execute(questions: Option<PathBuf>, catalog: Option<PathBuf>) -> Result<()> {
    let mut total_warnings = 0;

    if let Some(path) = questions {
        total_warnings += validate_banks(&path)?;
    }
    if let Some(path) = catalog {
        total_warnings += validate_catalogs(&path)?;
    }

    if total_warnings == 0 {
        println!("All files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
