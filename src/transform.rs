//! Transformation entry points
//!
//! Validates the command inputs, runs the parse and mapping passes, and
//! writes the resulting catalog document.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use clap::ValueEnum;

use crate::catalog::CatalogTranslator;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::identity::IdentitySource;
use crate::models::DatasetItem;
use crate::tsv::parse_dataset_metadata;

/// Kind of metadata supplied on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetadataType {
    Dataset,
    File,
}

/// Validate the input path and dispatch to the requested transformation.
///
/// The output lands next to the input, with the extension swapped to
/// `.jsonl`. Any validation failure aborts before any processing.
pub fn run(
    metadata: &Path,
    metadata_type: MetadataType,
    config: &AppConfig,
    identity: &dyn IdentitySource,
) -> AppResult<DatasetItem> {
    if !metadata.exists() {
        return Err(AppError::Validation(format!(
            "No file available at {}",
            metadata.display()
        )));
    }
    if metadata.extension().and_then(|e| e.to_str()) != Some("tsv") {
        return Err(AppError::Validation(format!(
            "Cannot operate on a non-TSV file: {}",
            metadata.display()
        )));
    }
    let output = metadata.with_extension("jsonl");

    match metadata_type {
        MetadataType::Dataset => transform_dataset_metadata(metadata, &output, config, identity),
        MetadataType::File => Err(AppError::Unimplemented(
            "file metadata transformation is not implemented".to_string(),
        )),
    }
}

/// Read, transform and write dataset metadata from TSV to JSON.
///
/// The document is written once to the output path and echoed to stdout.
pub fn transform_dataset_metadata(
    input: &Path,
    output: &Path,
    config: &AppConfig,
    identity: &dyn IdentitySource,
) -> AppResult<DatasetItem> {
    tracing::info!("Transforming dataset metadata from {}", input.display());

    let file = File::open(input)?;
    let (record, report) = parse_dataset_metadata(BufReader::new(file))?;
    if record.is_empty() {
        tracing::warn!("no recognized metadata fields found in {}", input.display());
    }
    tracing::info!(
        "Parsed {} of {} lines ({} unrecognized, {} errors)",
        report.parsed,
        report.lines,
        report.unrecognized.len(),
        report.errors.len()
    );

    let translator = CatalogTranslator::new(&config.provenance, identity);
    let item = translator.translate(&record)?;

    let serialized = serde_json::to_string(&item)?;
    println!("{serialized}");
    fs::write(output, &serialized)?;
    tracing::info!("Catalog metadata written to {}", output.display());

    Ok(item)
}
