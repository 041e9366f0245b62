//! Provenance block models
//!
//! The catalog schema requires every metadata item to carry a
//! `metadata_sources` block recording who and what produced it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ProvenanceConfig;
use crate::identity::IdentitySource;

/// The `metadata_sources` block attached to every catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSources {
    /// Placeholder required by the catalog schema, always empty here
    pub key_source_map: IndexMap<String, serde_json::Value>,
    pub sources: Vec<MetadataSource>,
}

/// One source entry describing a single transformation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSource {
    pub source_name: String,
    pub source_version: String,
    /// Seconds since the Unix epoch at the time of the run
    pub source_time: f64,
    pub agent_name: String,
    pub agent_email: String,
}

impl MetadataSources {
    /// Build the provenance block for one run.
    ///
    /// The agent identity comes from the injected source; its failure has
    /// already degraded to empty strings there and never aborts the run.
    pub fn collect(provenance: &ProvenanceConfig, identity: &dyn IdentitySource) -> Self {
        let (agent_name, agent_email) = identity.agent_identity();
        let now = chrono::Utc::now();
        let source_time = now.timestamp_micros() as f64 / 1_000_000.0;
        Self {
            key_source_map: IndexMap::new(),
            sources: vec![MetadataSource {
                source_name: provenance.source_name.clone(),
                source_version: provenance.source_version.clone(),
                source_time,
                agent_name,
                agent_email,
            }],
        }
    }
}
