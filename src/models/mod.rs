//! Catalog output models
//!
//! Serialization models for the catalog metadata document.

pub mod catalog;
pub mod provenance;

pub use catalog::{Author, AuthorIdentifier, DatasetItem, DisplayBlock, Publication};
pub use provenance::{MetadataSource, MetadataSources};
