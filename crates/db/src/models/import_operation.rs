//! Import-operation journal models.
//!
//! Journal rows are append-then-finalize: `created_at` is immutable once
//! set, `finished_at` is null while RUNNING and non-null in both terminal
//! states, `imported_count` is non-null only when COMPLETED.

use serde::Serialize;
use sqlx::FromRow;
use studygroup_core::types::{DbId, Timestamp};

/// Lifecycle state of one import attempt.
///
/// RUNNING transitions to exactly one of COMPLETED or FAILED; terminal
/// states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "import_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ImportStatus {
    Running,
    Completed,
    Failed,
}

/// One journal entry: who attempted an import and what happened.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOperation {
    pub id: DbId,
    pub status: ImportStatus,
    pub username: String,
    pub role: String,
    pub imported_count: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}
