//! Subcommand implementations.

pub mod history;
pub mod init;
pub mod path;
pub mod score;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use pathwise_store::{load_config_from, PathwiseConfig};

/// Load the config, letting explicit directory flags win.
fn resolve_config(
    config_path: Option<&Path>,
    catalog_dir: Option<PathBuf>,
    results_dir: Option<PathBuf>,
) -> Result<PathwiseConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(dir) = catalog_dir {
        config.catalog_dir = dir;
    }
    if let Some(dir) = results_dir {
        config.results_dir = dir;
    }
    Ok(config)
}
