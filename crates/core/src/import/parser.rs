//! Structural parser: raw bytes to an ordered sequence of candidate records.
//!
//! The supported format is decided by filename extension or declared
//! content type, never by sniffing the bytes. Any failure yields zero
//! records and exactly one descriptor; schema mismatches carry a
//! best-effort dotted field path and the first array index found in the
//! deserializer's error context.

use serde_json::error::Category;
use serde_path_to_error::Segment;

use super::{ImportError, ImportFailure, WHOLE_FILE};
use crate::group::GroupRecord;

const JSON_CONTENT_TYPE: &str = "application/json";
const JSON_EXTENSION: &str = ".json";

/// Whether the declared filename/content type names the supported format.
pub fn is_supported_format(filename: &str, content_type: Option<&str>) -> bool {
    filename.to_lowercase().ends_with(JSON_EXTENSION)
        || content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(JSON_CONTENT_TYPE))
}

/// Parse a batch file into candidate records.
///
/// Returns the ordered record sequence, or a single-descriptor failure:
/// [`ImportFailure::UnsupportedFormat`], [`ImportFailure::Structural`],
/// [`ImportFailure::SchemaMismatch`], or [`ImportFailure::Io`].
pub fn parse_records(
    bytes: &[u8],
    filename: &str,
    content_type: Option<&str>,
) -> Result<Vec<GroupRecord>, ImportFailure> {
    if !is_supported_format(filename, content_type) {
        return Err(ImportFailure::UnsupportedFormat(ImportError::file(
            "Unsupported file type. Use .json",
        )));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let records = serde_path_to_error::deserialize::<_, Vec<GroupRecord>>(&mut deserializer)
        .map_err(classify_parse_error)?;
    deserializer.end().map_err(|e| {
        ImportFailure::Structural(ImportError::file(format!(
            "Invalid JSON near line {}, column {}",
            e.line(),
            e.column()
        )))
    })?;
    Ok(records)
}

/// Map a deserialization error onto the import taxonomy.
///
/// Syntax and unexpected-EOF problems are structural; data errors are
/// schema mismatches with a (field path, record index) pair reconstructed
/// from the error's path context. An empty path degrades to a file-level
/// descriptor rather than losing the finding.
fn classify_parse_error(err: serde_path_to_error::Error<serde_json::Error>) -> ImportFailure {
    let field_path = dotted_field_path(&err);
    let record_index = first_record_index(&err);
    let inner = err.into_inner();

    match inner.classify() {
        Category::Io => ImportFailure::Io(ImportError::file("Cannot read file")),
        Category::Syntax | Category::Eof => {
            ImportFailure::Structural(ImportError::file(format!(
                "Invalid JSON near line {}, column {}",
                inner.line(),
                inner.column()
            )))
        }
        Category::Data => match field_path {
            Some(field) => ImportFailure::SchemaMismatch(ImportError::new(
                record_index,
                field.clone(),
                format!("Invalid value for field '{field}'"),
            )),
            None => {
                let message = if inner.line() > 0 {
                    format!(
                        "Invalid JSON near line {}, column {}",
                        inner.line(),
                        inner.column()
                    )
                } else {
                    "Invalid JSON structure or value".to_string()
                };
                ImportFailure::SchemaMismatch(ImportError::new(record_index, "file", message))
            }
        },
    }
}

/// Join the map keys of the error path with dots, skipping array indices.
fn dotted_field_path(err: &serde_path_to_error::Error<serde_json::Error>) -> Option<String> {
    let mut path = String::new();
    for segment in err.path().iter() {
        match segment {
            Segment::Map { key } | Segment::Enum { variant: key } => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
            }
            Segment::Seq { .. } | Segment::Unknown => {}
        }
    }
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// The first array index in the error path, or [`WHOLE_FILE`] if none.
fn first_record_index(err: &serde_path_to_error::Error<serde_json::Error>) -> i32 {
    for segment in err.path().iter() {
        if let Segment::Seq { index } = segment {
            return *index as i32;
        }
    }
    WHOLE_FILE
}
