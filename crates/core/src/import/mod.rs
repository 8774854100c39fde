//! Bulk-import error taxonomy and pure pipeline stages.
//!
//! Every reported problem, structural or semantic, uses the same
//! [`ImportError`] descriptor shape so callers always receive one format.
//! [`ImportFailure`] classifies a failed import attempt by stage; the
//! orchestrator records its short [`summary`](ImportFailure::summary) in
//! the operation journal and propagates the full descriptor list to the
//! caller.

pub mod parser;
pub mod validate;

use serde::Serialize;

/// Record index marking a whole-file finding with no single record.
pub const WHOLE_FILE: i32 = -1;

/// Upper bound on the journal's stored failure synopsis, in characters.
pub const ERROR_SUMMARY_MAX_CHARS: usize = 2000;

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// One reported problem: which record, which field, what is wrong.
///
/// `record_index` is the zero-based position of the candidate record within
/// the submitted batch; [`WHOLE_FILE`] denotes a file-level finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportError {
    pub record_index: i32,
    pub field: String,
    pub message: String,
}

impl ImportError {
    pub fn new(record_index: i32, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record_index,
            field: field.into(),
            message: message.into(),
        }
    }

    /// A file-level finding (`record_index == -1`, `field == "file"`).
    pub fn file(message: impl Into<String>) -> Self {
        Self::new(WHOLE_FILE, "file", message)
    }
}

// ---------------------------------------------------------------------------
// Failure taxonomy
// ---------------------------------------------------------------------------

/// Why an import attempt failed, classified by pipeline stage.
///
/// The parser-stage variants carry exactly one descriptor; the validator
/// and uniqueness stages aggregate one-or-more.
#[derive(Debug, thiserror::Error)]
pub enum ImportFailure {
    #[error("unsupported file format")]
    UnsupportedFormat(ImportError),

    #[error("malformed input")]
    Structural(ImportError),

    #[error("input does not match the expected record shape")]
    SchemaMismatch(ImportError),

    #[error("input could not be read")]
    Io(ImportError),

    #[error("field validation failed with {} error(s)", .0.len())]
    Validation(Vec<ImportError>),

    #[error("uniqueness conflict with {} error(s)", .0.len())]
    Uniqueness(Vec<ImportError>),

    #[error("batch could not be persisted")]
    Persistence(ImportError),
}

impl ImportFailure {
    /// The standard rejection for an empty or missing upload.
    pub fn empty_file() -> Self {
        Self::UnsupportedFormat(ImportError::file("Empty or missing file"))
    }

    /// The generic, non-leaking descriptor for a storage-stage failure.
    pub fn persistence() -> Self {
        Self::Persistence(ImportError::file("Import could not be persisted"))
    }

    /// The full descriptor list carried by this failure.
    pub fn errors(&self) -> &[ImportError] {
        match self {
            Self::UnsupportedFormat(e)
            | Self::Structural(e)
            | Self::SchemaMismatch(e)
            | Self::Io(e)
            | Self::Persistence(e) => std::slice::from_ref(e),
            Self::Validation(errors) | Self::Uniqueness(errors) => errors,
        }
    }

    /// Short human-readable synopsis for the operation journal, bounded to
    /// [`ERROR_SUMMARY_MAX_CHARS`]. Never the full descriptor list.
    pub fn summary(&self) -> String {
        let text = match self {
            Self::UnsupportedFormat(e)
            | Self::Structural(e)
            | Self::SchemaMismatch(e)
            | Self::Io(e)
            | Self::Persistence(e) => e.message.clone(),
            Self::Validation(errors) => format!("{} validation error(s)", errors.len()),
            Self::Uniqueness(errors) => format!("{} uniqueness conflict(s)", errors.len()),
        };
        truncate_chars(&text, ERROR_SUMMARY_MAX_CHARS)
    }
}

/// Truncate to at most `max` characters on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
