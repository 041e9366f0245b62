//! Raw record to catalog item translator
//!
//! Translates the accumulated raw metadata record into a catalog-valid
//! dataset item. Most fields pass through unchanged; authors, publications
//! and the organization display block need reshaping.

use indexmap::IndexMap;

use crate::config::ProvenanceConfig;
use crate::error::{AppError, AppResult};
use crate::identity::IdentitySource;
use crate::models::{
    Author, AuthorIdentifier, DatasetItem, DisplayBlock, MetadataSources, Publication,
};
use crate::schema::{self, CatalogField};
use crate::tsv::{FieldValue, ParsedValue, RawRecord};

/// Version to record when the incoming metadata does not supply one
const DEFAULT_VERSION: &str = "latest";

/// Raw record translator
pub struct CatalogTranslator<'a> {
    provenance: &'a ProvenanceConfig,
    identity: &'a dyn IdentitySource,
}

impl<'a> CatalogTranslator<'a> {
    /// Create a new translator
    pub fn new(provenance: &'a ProvenanceConfig, identity: &'a dyn IdentitySource) -> Self {
        Self {
            provenance,
            identity,
        }
    }

    /// Translate a raw record into a catalog dataset item.
    ///
    /// A missing dataset identifier is the only fatal condition; every
    /// other per-field anomaly degrades to empty values.
    pub fn translate(&self, record: &RawRecord) -> AppResult<DatasetItem> {
        let mut item = DatasetItem {
            item_type: "dataset".to_string(),
            dataset_id: dataset_id(record)?,
            dataset_version: dataset_version(record),
            name: scalar_or_default(record, "name"),
            description: scalar_or_default(record, "description"),
            metadata_sources: MetadataSources::collect(self.provenance, self.identity),
            authors: Vec::new(),
            publications: Vec::new(),
            additional_display: Vec::new(),
            extra: IndexMap::new(),
        };

        for (key, value) in record.iter() {
            match CatalogField::from_key(key) {
                // already set on the baseline item
                Some(
                    CatalogField::DatasetId
                    | CatalogField::DatasetVersion
                    | CatalogField::Name
                    | CatalogField::Description,
                ) => {}
                Some(CatalogField::Authors) => {
                    item.authors = value.entries().map(author_from).collect();
                }
                Some(CatalogField::Publications) => {
                    item.publications = value.entries().map(publication_from).collect();
                }
                Some(CatalogField::AdditionalDisplay) => {
                    item.additional_display.push(display_block(value));
                }
                // keywords, top_display and anything unknown pass through
                Some(CatalogField::Keywords | CatalogField::TopDisplay) | None => {
                    item.extra.insert(key.to_string(), to_json(value));
                }
            }
        }

        Ok(item)
    }
}

/// The dataset identifier is the one field the catalog cannot live without
fn dataset_id(record: &RawRecord) -> AppResult<String> {
    record
        .get("dataset_id")
        .and_then(FieldValue::first_text)
        .map(String::from)
        .ok_or_else(|| {
            AppError::MissingIdentifier(
                "the input metadata supplies no 'identifier' field".to_string(),
            )
        })
}

fn dataset_version(record: &RawRecord) -> String {
    record
        .get("dataset_version")
        .and_then(FieldValue::first_text)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

fn scalar_or_default(record: &RawRecord, key: &str) -> String {
    record
        .get(key)
        .and_then(FieldValue::first_text)
        .unwrap_or_default()
        .to_string()
}

/// Build a catalog author from one parsed occurrence.
///
/// Given and family names are never derived from the full name, and
/// incoming affiliation data is dropped. A bare text occurrence is read
/// as the field's first column (the full name).
fn author_from(entry: &ParsedValue) -> Author {
    let (full_name, orcid, email) = match entry {
        ParsedValue::Row(row) => (
            row.get("full_name").cloned().unwrap_or_default(),
            row.get("orcid").cloned(),
            row.get("email").cloned().unwrap_or_default(),
        ),
        ParsedValue::Text(text) => (text.clone(), None, String::new()),
        ParsedValue::Values(values) => (
            values.first().cloned().unwrap_or_default(),
            None,
            String::new(),
        ),
    };
    Author {
        name: full_name,
        given_name: String::new(),
        family_name: String::new(),
        email,
        honorific_suffix: String::new(),
        identifiers: orcid.map(|o| vec![AuthorIdentifier::orcid(o)]).unwrap_or_default(),
    }
}

/// Build a catalog publication from one parsed occurrence.
///
/// The catalog expects title, doi and authors; incoming metadata supplies
/// doi and a free-text citation, which becomes the title. A bare text
/// occurrence is read as the field's first column (the DOI).
fn publication_from(entry: &ParsedValue) -> Publication {
    let (doi, citation) = match entry {
        ParsedValue::Row(row) => (
            row.get("doi").cloned().unwrap_or_default(),
            row.get("citation").cloned().unwrap_or_default(),
        ),
        ParsedValue::Text(text) => (text.clone(), String::new()),
        ParsedValue::Values(values) => {
            (values.first().cloned().unwrap_or_default(), String::new())
        }
    };
    Publication {
        publication_type: String::new(),
        title: citation,
        doi,
        date_published: String::new(),
        publication_outlet: String::new(),
        authors: Vec::new(),
    }
}

/// Collapse the organization display field's name/value rows into one block
fn display_block(value: &FieldValue) -> DisplayBlock {
    let mut content = IndexMap::new();
    for entry in value.entries() {
        match entry {
            ParsedValue::Row(row) => {
                content.insert(
                    row.get("name").cloned().unwrap_or_default(),
                    row.get("value").cloned().unwrap_or_default(),
                );
            }
            ParsedValue::Text(name) => {
                content.insert(name.clone(), String::new());
            }
            ParsedValue::Values(values) => {
                if let Some(name) = values.first() {
                    content.insert(name.clone(), values.get(1).cloned().unwrap_or_default());
                }
            }
        }
    }
    DisplayBlock {
        name: schema::source_field("additional_display")
            .unwrap_or("additional_display")
            .to_string(),
        content,
    }
}

fn to_json(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Single(entry) => parsed_to_json(entry),
        FieldValue::Many(entries) => {
            serde_json::Value::Array(entries.iter().map(parsed_to_json).collect())
        }
    }
}

fn parsed_to_json(entry: &ParsedValue) -> serde_json::Value {
    match entry {
        ParsedValue::Text(text) => serde_json::Value::String(text.clone()),
        ParsedValue::Values(values) => serde_json::Value::Array(
            values
                .iter()
                .map(|v| serde_json::Value::String(v.clone()))
                .collect(),
        ),
        ParsedValue::Row(row) => serde_json::Value::Object(
            row.iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentitySource;
    use crate::tsv::parse_dataset_metadata;
    use std::io::Cursor;

    fn fixed_identity() -> MockIdentitySource {
        let mut identity = MockIdentitySource::new();
        identity
            .expect_agent_identity()
            .return_const(("Jane Doe".to_string(), "jane@example.org".to_string()));
        identity
    }

    fn translate(input: &str) -> AppResult<DatasetItem> {
        let (record, _) = parse_dataset_metadata(Cursor::new(input)).unwrap();
        let provenance = ProvenanceConfig::default();
        let identity = fixed_identity();
        CatalogTranslator::new(&provenance, &identity).translate(&record)
    }

    #[test]
    fn test_baseline_defaults() {
        let item = translate("identifier\tDS001\n").unwrap();
        assert_eq!(item.item_type, "dataset");
        assert_eq!(item.dataset_id, "DS001");
        assert_eq!(item.dataset_version, "latest");
        assert_eq!(item.name, "");
        assert_eq!(item.description, "");
        assert!(item.authors.is_empty());
        assert!(item.publications.is_empty());
        assert_eq!(item.metadata_sources.sources[0].agent_name, "Jane Doe");
        assert_eq!(item.metadata_sources.sources[0].agent_email, "jane@example.org");
    }

    #[test]
    fn test_missing_identifier_is_fatal() {
        let result = translate("name\tMy dataset\n");
        assert!(matches!(result, Err(AppError::MissingIdentifier(_))));
    }

    #[test]
    fn test_empty_version_defaults_to_latest() {
        let item = translate("identifier\tDS001\nversion\t\n").unwrap();
        assert_eq!(item.dataset_version, "latest");
    }

    #[test]
    fn test_supplied_version_kept() {
        let item = translate("identifier\tDS001\nversion\t0.2.1\n").unwrap();
        assert_eq!(item.dataset_version, "0.2.1");
    }

    #[test]
    fn test_author_with_orcid() {
        let item =
            translate("identifier\tDS001\nauthor\tJane Doe\t0000-0001-2345-6789\n").unwrap();
        assert_eq!(item.authors.len(), 1);
        let author = &item.authors[0];
        assert_eq!(author.name, "Jane Doe");
        assert_eq!(author.email, "");
        assert_eq!(author.given_name, "");
        assert_eq!(author.family_name, "");
        assert_eq!(
            author.identifiers,
            vec![AuthorIdentifier::orcid("0000-0001-2345-6789")]
        );
    }

    #[test]
    fn test_author_without_orcid_has_no_identifiers() {
        let item = translate("identifier\tDS001\nauthor\tJane Doe\n").unwrap();
        assert_eq!(item.authors.len(), 1);
        assert_eq!(item.authors[0].name, "Jane Doe");
        assert!(item.authors[0].identifiers.is_empty());
    }

    #[test]
    fn test_multiple_authors_in_source_order() {
        let input = "identifier\tDS001\n\
                     author\tJane Doe\t0000-0001\tj@x.org\n\
                     author\tJohn Roe\t0000-0002\n";
        let item = translate(input).unwrap();
        assert_eq!(item.authors.len(), 2);
        assert_eq!(item.authors[0].name, "Jane Doe");
        assert_eq!(item.authors[0].email, "j@x.org");
        assert_eq!(item.authors[1].name, "John Roe");
        assert_eq!(item.authors[1].email, "");
    }

    #[test]
    fn test_affiliations_are_dropped() {
        let input = "identifier\tDS001\nauthor\tJane Doe\t0000-0001\tj@x.org\tSome university\n";
        let item = translate(input).unwrap();
        let json = serde_json::to_value(&item.authors[0]).unwrap();
        assert!(json.get("affiliations").is_none());
    }

    #[test]
    fn test_publication_citation_becomes_title() {
        let input = "identifier\tDS001\npublication\t10.1000/182\tDoe et al. (2023)\n";
        let item = translate(input).unwrap();
        assert_eq!(item.publications.len(), 1);
        let publication = &item.publications[0];
        assert_eq!(publication.title, "Doe et al. (2023)");
        assert_eq!(publication.doi, "10.1000/182");
        assert_eq!(publication.publication_type, "");
        assert_eq!(publication.date_published, "");
        assert_eq!(publication.publication_outlet, "");
        assert!(publication.authors.is_empty());
    }

    #[test]
    fn test_additional_display_collapses_rows() {
        let input = "identifier\tDS001\n\
                     sfb1451\tproject\tZ03\n\
                     sfb1451\tsample\thuman\n";
        let item = translate(input).unwrap();
        assert_eq!(item.additional_display.len(), 1);
        let block = &item.additional_display[0];
        assert_eq!(block.name, "sfb1451");
        assert_eq!(block.content.get("project").map(String::as_str), Some("Z03"));
        assert_eq!(block.content.get("sample").map(String::as_str), Some("human"));
    }

    #[test]
    fn test_top_display_passes_through_verbatim() {
        let input = "identifier\tDS001\n\
                     property\tmodality\tMRI\n\
                     property\tspecies\thuman\n";
        let item = translate(input).unwrap();
        assert!(item.additional_display.is_empty());
        let top = item.extra.get("top_display").unwrap();
        assert_eq!(
            top,
            &serde_json::json!([
                {"name": "modality", "value": "MRI"},
                {"name": "species", "value": "human"}
            ])
        );
    }

    #[test]
    fn test_keywords_pass_through() {
        let item = translate("identifier\tDS001\nkeywords\talpha\tbeta\n").unwrap();
        assert_eq!(
            item.extra.get("keywords").unwrap(),
            &serde_json::json!(["alpha", "beta"])
        );
    }

    #[test]
    fn test_serialized_shape() {
        let input = "identifier\tDS001\nname\tMy dataset\nauthor\tJane Doe\t0000-0001\n";
        let item = translate(input).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "dataset");
        assert_eq!(json["dataset_id"], "DS001");
        assert_eq!(json["name"], "My dataset");
        assert_eq!(json["authors"][0]["givenName"], "");
        assert_eq!(json["authors"][0]["identifiers"][0]["type"], "ORCID");
        assert_eq!(json["metadata_sources"]["key_source_map"], serde_json::json!({}));
        // publications entirely absent when no publication was supplied
        assert!(json.get("publications").is_none());
    }
}
