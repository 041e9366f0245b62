//! TSV metadata parser
//!
//! Parses tab-separated metadata lines into a structured raw record.
//! Each line carries one occurrence of a field: the first column is the
//! field name, the remaining columns are that field's value(s).

use std::io::BufRead;

use indexmap::IndexMap;

use crate::error::AppResult;
use crate::schema::{self, FieldSchema};

/// One parsed occurrence of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    /// A single supplied value. Produced whenever exactly one value is on
    /// the line, even for fields that define columns.
    Text(String),
    /// Multiple values zipped against the schema's column names, in order
    Row(IndexMap<String, String>),
    /// Multiple values of a homogeneous list field, kept verbatim
    Values(Vec<String>),
}

/// Accumulated value for one catalog key
///
/// A repeated field converts permanently to `Many`; it never reverts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(ParsedValue),
    Many(Vec<ParsedValue>),
}

impl FieldValue {
    /// Iterate over the occurrences, whether one or many
    pub fn entries(&self) -> impl Iterator<Item = &ParsedValue> {
        match self {
            FieldValue::Single(v) => std::slice::from_ref(v).iter(),
            FieldValue::Many(vs) => vs.iter(),
        }
    }

    /// First textual value, if any occurrence carries one
    pub fn first_text(&self) -> Option<&str> {
        self.entries().find_map(|entry| match entry {
            ParsedValue::Text(s) => Some(s.as_str()),
            ParsedValue::Values(vs) => vs.first().map(String::as_str),
            ParsedValue::Row(_) => None,
        })
    }
}

/// In-progress mapping from catalog field name to accumulated value
#[derive(Debug, Clone, Default)]
pub struct RawRecord(IndexMap<String, FieldValue>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one parsed occurrence under the given catalog key.
    ///
    /// First occurrence stores the value as-is; a repeat converts the
    /// existing value to a list and appends.
    pub fn insert(&mut self, key: &str, value: ParsedValue) {
        match self.0.get_mut(key) {
            Some(FieldValue::Many(values)) => values.push(value),
            Some(existing) => {
                let FieldValue::Single(previous) =
                    std::mem::replace(existing, FieldValue::Many(Vec::new()))
                else {
                    unreachable!("Many handled above");
                };
                *existing = FieldValue::Many(vec![previous, value]);
            }
            None => {
                self.0.insert(key.to_string(), FieldValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A field name that was not found in the dataset schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedField {
    pub line: usize,
    pub field: String,
}

/// A line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

/// Diagnostics collected while parsing one metadata file
///
/// Unrecognized fields and malformed lines are skipped, never fatal.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Total number of lines read
    pub lines: usize,
    /// Number of field occurrences merged into the record
    pub parsed: usize,
    pub unrecognized: Vec<UnrecognizedField>,
    pub errors: Vec<LineError>,
}

/// Parse a stream of tab-separated metadata lines into a raw record.
///
/// A single bad line never aborts the file: unrecognized field names and
/// per-line parse failures are logged, recorded in the report and skipped.
/// Only an I/O failure while reading the stream is propagated.
pub fn parse_dataset_metadata<R: BufRead>(reader: R) -> AppResult<(RawRecord, ParseReport)> {
    let mut record = RawRecord::new();
    let mut report = ParseReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        report.lines += 1;

        // trailing whitespace (including empty trailing columns) is stripped
        let mut columns = line.trim_end().split('\t');
        // split always yields at least one (possibly empty) element
        let field = columns.next().unwrap_or_default();
        let values: Vec<String> = columns.map(String::from).collect();

        let Some(item_schema) = schema::dataset_field(field) else {
            tracing::warn!("non-recognized field encountered in line {line_no}: {field}");
            report.unrecognized.push(UnrecognizedField {
                line: line_no,
                field: field.to_string(),
            });
            continue;
        };

        match parse_occurrence(&values, item_schema) {
            Ok(value) => {
                // mapping is total over the schema, checked by unit test
                if let Some(catalog_key) = schema::catalog_key(field) {
                    record.insert(catalog_key, value);
                    report.parsed += 1;
                }
            }
            Err(message) => {
                tracing::error!("Error encountered on line {line_no}: {message}");
                report.errors.push(LineError {
                    line: line_no,
                    message,
                });
            }
        }
    }

    Ok((record, report))
}

/// Shape one line's values according to the field schema.
///
/// The shape is decided by the number of supplied values, not by the
/// schema's declared type: a single value is always a plain scalar.
fn parse_occurrence(values: &[String], item_schema: &FieldSchema) -> Result<ParsedValue, String> {
    if values.len() > 1 {
        match item_schema.columns {
            // All columns share one definition, keep the list verbatim
            None => Ok(ParsedValue::Values(values.to_vec())),
            // Zip values onto column names; zip stops at the shorter side,
            // so missing columns are omitted and excess values are dropped
            Some(columns) => Ok(ParsedValue::Row(
                columns
                    .iter()
                    .zip(values)
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            )),
        }
    } else {
        match values.first() {
            Some(value) => Ok(ParsedValue::Text(value.clone())),
            None => Err("no value supplied".to_string()),
        }
    }
}
