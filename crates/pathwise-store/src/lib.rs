//! pathwise-store: store adapters for pathwise.
//!
//! Implements the question, catalog and result store traits from
//! `pathwise-core` over memory, TOML directories and JSON files, and loads
//! the configuration that points at them.

pub mod config;
pub mod directory;
pub mod file_results;
pub mod memory;

pub use config::{load_config_from, PathwiseConfig};
pub use directory::DirectoryStore;
pub use file_results::FileResultStore;
pub use memory::MemoryStore;
