//! Store configuration and factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file_results::FileResultStore;

/// Top-level pathwise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathwiseConfig {
    /// Directory of question bank TOML files.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: PathBuf,
    /// Directory of catalog path TOML files.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,
    /// Directory results are written to.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

const DEFAULT_DATA_DIR: &str = "./pathwise-data";

fn default_questions_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR).join("questions")
}
fn default_catalog_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR).join("catalogs")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR).join("results")
}

impl Default for PathwiseConfig {
    fn default() -> Self {
        Self {
            questions_dir: default_questions_dir(),
            catalog_dir: default_catalog_dir(),
            results_dir: default_results_dir(),
        }
    }
}

impl PathwiseConfig {
    /// Config with every directory under `root`.
    pub fn with_data_dir(root: &Path) -> Self {
        Self {
            questions_dir: root.join("questions"),
            catalog_dir: root.join("catalogs"),
            results_dir: root.join("results"),
        }
    }

    /// Result store rooted at `results_dir`.
    pub fn result_store(&self) -> FileResultStore {
        FileResultStore::new(&self.results_dir)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Each reference is expanded once; substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `pathwise.toml` in the current directory
/// 2. `~/.config/pathwise/config.toml`
///
/// `PATHWISE_DATA_DIR` overrides every directory with subdirectories of
/// the given root.
pub fn load_config_from(path: Option<&Path>) -> Result<PathwiseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pathwise.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PathwiseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PathwiseConfig::default(),
    };

    if let Ok(root) = std::env::var("PATHWISE_DATA_DIR") {
        config = PathwiseConfig::with_data_dir(Path::new(&root));
    }

    config.questions_dir = resolve_path(&config.questions_dir);
    config.catalog_dir = resolve_path(&config.catalog_dir);
    config.results_dir = resolve_path(&config.results_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pathwise"))
}
