//! Tabular metadata parsing
//!
//! This module reads tab-separated metadata files, one field occurrence per
//! line, and accumulates them into a raw record keyed by catalog field name.

pub mod parser;

pub use parser::{parse_dataset_metadata, FieldValue, ParseReport, ParsedValue, RawRecord};
