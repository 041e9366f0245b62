//! Catalog dataset item models

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::provenance::MetadataSources;

/// A complete catalog metadata document for one dataset
///
/// Field order matters only for readability of the serialized document;
/// unknown catalog keys are carried verbatim in `extra`.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub dataset_id: String,
    pub dataset_version: String,
    pub name: String,
    pub description: String,
    pub metadata_sources: MetadataSources,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub publications: Vec<Publication>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_display: Vec<DisplayBlock>,
    /// Pass-through catalog fields (keywords, top_display, ...)
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// One dataset author in catalog shape
///
/// Only name, email and ORCID are derivable from incoming metadata; the
/// remaining attributes are kept as empty placeholders required by the
/// catalog schema. Incoming affiliation data is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
    pub email: String,
    #[serde(rename = "honorificSuffix")]
    pub honorific_suffix: String,
    pub identifiers: Vec<AuthorIdentifier>,
}

/// An external identifier attached to an author (currently only ORCID)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorIdentifier {
    #[serde(rename = "type")]
    pub identifier_type: String,
    pub identifier: String,
}

impl AuthorIdentifier {
    pub fn orcid(identifier: impl Into<String>) -> Self {
        Self {
            identifier_type: "ORCID".to_string(),
            identifier: identifier.into(),
        }
    }
}

/// One publication associated with the dataset
///
/// Incoming metadata supplies only a DOI and a free-text citation; the
/// citation becomes the title and no structured parsing is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Publication {
    #[serde(rename = "type")]
    pub publication_type: String,
    pub title: String,
    pub doi: String,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "publicationOutlet")]
    pub publication_outlet: String,
    pub authors: Vec<Author>,
}

/// A named block of display properties
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayBlock {
    pub name: String,
    pub content: IndexMap<String, String>,
}
