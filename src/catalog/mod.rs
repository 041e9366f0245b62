//! Catalog mapping
//!
//! This module reshapes a raw metadata record into the document structure
//! required by the catalog schema.

pub mod translator;

pub use translator::CatalogTranslator;
