//! pathwise-core: assessment scoring and learning-path personalization.
//!
//! This crate defines the data model, the scoring and classification rules,
//! the attempt state machine, and the path personalizer. Persistence is
//! reached only through the store traits in [`traits`].

pub mod error;
pub mod level;
pub mod model;
pub mod parser;
pub mod personalize;
pub mod recorder;
pub mod result;
pub mod scoring;
pub mod service;
pub mod session;
pub mod traits;

pub use error::{AssessmentError, StoreError};
