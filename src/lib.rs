//! Catmeta - Tabular dataset metadata to catalog JSON transformer
//!
//! Reads a TSV file holding one metadata field occurrence per line,
//! validates and reshapes the values against a fixed field schema, and
//! produces a single JSON document in the catalog vocabulary.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod schema;
pub mod transform;
pub mod tsv;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
