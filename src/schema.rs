//! Field schema and name mapping tables
//!
//! The dataset schema describes every recognized field of the incoming
//! tabular metadata and how its values are shaped. The two mapping tables
//! translate between incoming field names and catalog field names.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Shape of a recognized field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A single text value
    Text,
    /// A list of values, possibly with named columns
    List,
}

/// How often a field may be supplied in one metadata file
///
/// Informational only, not enforced during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Single,
    Multiple,
}

/// Schema entry for one recognized incoming field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    /// Whether the field is needed for a valid catalog entry (informational)
    pub required: bool,
    pub multiplicity: Multiplicity,
    /// Column headings, in order, for structured list fields.
    /// `None` for list fields means all columns share one definition
    /// (a homogeneous list, e.g. keywords).
    pub columns: Option<&'static [&'static str]>,
}

impl FieldSchema {
    const fn text(required: bool) -> Self {
        Self {
            field_type: FieldType::Text,
            required,
            multiplicity: Multiplicity::Single,
            columns: None,
        }
    }

    const fn list(multiplicity: Multiplicity, columns: Option<&'static [&'static str]>) -> Self {
        Self {
            field_type: FieldType::List,
            required: false,
            multiplicity,
            columns,
        }
    }
}

/// All recognized incoming dataset metadata fields
pub static DATASET_SCHEMA: Lazy<IndexMap<&'static str, FieldSchema>> = Lazy::new(|| {
    IndexMap::from([
        ("identifier", FieldSchema::text(true)),
        ("version", FieldSchema::text(false)),
        ("name", FieldSchema::text(true)),
        ("description", FieldSchema::text(false)),
        (
            "author",
            FieldSchema::list(
                Multiplicity::Multiple,
                Some(&["full_name", "orcid", "email", "affiliations"]),
            ),
        ),
        (
            "publication",
            FieldSchema::list(Multiplicity::Multiple, Some(&["doi", "citation"])),
        ),
        ("keywords", FieldSchema::list(Multiplicity::Single, None)),
        (
            "property",
            FieldSchema::list(Multiplicity::Multiple, Some(&["name", "value"])),
        ),
        (
            "sfb1451",
            FieldSchema::list(Multiplicity::Multiple, Some(&["name", "value"])),
        ),
    ])
});

/// Mapping of incoming field names to catalog field names
pub static DATASET_CATALOG_MAPPING: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("identifier", "dataset_id"),
        ("version", "dataset_version"),
        ("name", "name"),
        ("description", "description"),
        ("author", "authors"),
        ("publication", "publications"),
        ("keywords", "keywords"),
        ("property", "top_display"),
        ("sfb1451", "additional_display"),
    ])
});

/// The inverse mapping, derived mechanically from the forward table
pub static CATALOG_DATASET_MAPPING: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| DATASET_CATALOG_MAPPING.iter().map(|(k, v)| (*v, *k)).collect());

/// Look up the schema entry for an incoming field name
pub fn dataset_field(name: &str) -> Option<&'static FieldSchema> {
    DATASET_SCHEMA.get(name)
}

/// Translate an incoming field name to its catalog field name
pub fn catalog_key(field: &str) -> Option<&'static str> {
    DATASET_CATALOG_MAPPING.get(field).copied()
}

/// Translate a catalog field name back to the incoming field name
pub fn source_field(catalog: &str) -> Option<&'static str> {
    CATALOG_DATASET_MAPPING.get(catalog).copied()
}

/// The closed set of catalog field names the mapper knows how to reshape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    DatasetId,
    DatasetVersion,
    Name,
    Description,
    Authors,
    Publications,
    Keywords,
    TopDisplay,
    AdditionalDisplay,
}

impl CatalogField {
    /// Resolve a catalog key to its enumeration variant
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "dataset_id" => Some(CatalogField::DatasetId),
            "dataset_version" => Some(CatalogField::DatasetVersion),
            "name" => Some(CatalogField::Name),
            "description" => Some(CatalogField::Description),
            "authors" => Some(CatalogField::Authors),
            "publications" => Some(CatalogField::Publications),
            "keywords" => Some(CatalogField::Keywords),
            "top_display" => Some(CatalogField::TopDisplay),
            "additional_display" => Some(CatalogField::AdditionalDisplay),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_covers_schema() {
        for field in DATASET_SCHEMA.keys() {
            assert!(
                catalog_key(field).is_some(),
                "field {field} has no catalog mapping"
            );
        }
    }

    #[test]
    fn test_reverse_mapping_unambiguous() {
        // If two source fields mapped to the same catalog key, the derived
        // reverse table would lose one of them.
        assert_eq!(CATALOG_DATASET_MAPPING.len(), DATASET_CATALOG_MAPPING.len());
        for (field, catalog) in DATASET_CATALOG_MAPPING.iter() {
            assert_eq!(source_field(catalog), Some(*field));
        }
    }

    #[test]
    fn test_catalog_field_dispatch() {
        for catalog in DATASET_CATALOG_MAPPING.values() {
            assert!(CatalogField::from_key(catalog).is_some());
        }
        assert!(CatalogField::from_key("unknown").is_none());
    }

    #[test]
    fn test_author_columns() {
        let schema = dataset_field("author").unwrap();
        assert_eq!(
            schema.columns,
            Some(&["full_name", "orcid", "email", "affiliations"][..])
        );
    }
}
