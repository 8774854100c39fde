//! Import orchestrator.
//!
//! Sequences parse → validate → unique-check → persist and wraps the whole
//! attempt in a journal entry. Two transaction scopes are in play: the
//! journal writes auto-commit on the pool and survive any later rollback;
//! the batch insert runs in its own transaction and rolls back entirely on
//! failure, so no partial batch is ever visible.

use serde::Serialize;
use sqlx::PgPool;
use studygroup_core::import::{parser, validate, ImportError, ImportFailure, WHOLE_FILE};
use studygroup_core::types::DbId;
use studygroup_db::models::group::CreateStudyGroup;
use studygroup_db::repositories::{GroupRepo, ImportOperationRepo};

use crate::actor::Actor;
use crate::error::AppResult;
use crate::uniqueness;

/// Success payload of one import attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub imported_count: usize,
    pub message: String,
}

/// Run the full import pipeline for one uploaded file.
///
/// An empty upload is rejected before any journal entry exists; every
/// other outcome, success or failure, is recorded against a journal entry
/// opened up front.
pub async fn import_from_file(
    pool: &PgPool,
    bytes: &[u8],
    filename: &str,
    content_type: Option<&str>,
    actor: &Actor,
) -> AppResult<ImportResult> {
    if bytes.is_empty() {
        return Err(ImportFailure::empty_file().into());
    }

    let operation = ImportOperationRepo::create_running(pool, &actor.username, &actor.role).await?;
    tracing::info!(
        operation_id = operation.id,
        username = %actor.username,
        filename = %filename,
        size_bytes = bytes.len(),
        "Import attempt started"
    );

    match run_pipeline(pool, bytes, filename, content_type).await {
        Ok(imported_count) => {
            finalize_completed(pool, operation.id, imported_count).await;
            tracing::info!(
                operation_id = operation.id,
                imported_count,
                "Import completed"
            );
            Ok(ImportResult {
                imported_count,
                message: "Imported successfully".to_string(),
            })
        }
        Err(failure) => {
            finalize_failed(pool, operation.id, &failure.summary()).await;
            tracing::warn!(operation_id = operation.id, error = %failure, "Import failed");
            Err(failure.into())
        }
    }
}

/// Parse, validate, unique-check, and persist the batch.
///
/// Pure stages run first; the store is only touched once the batch has no
/// known problems, and the batch insert is atomic.
async fn run_pipeline(
    pool: &PgPool,
    bytes: &[u8],
    filename: &str,
    content_type: Option<&str>,
) -> Result<usize, ImportFailure> {
    let records = parser::parse_records(bytes, filename, content_type)?;

    let violations = validate::validate_all(&records);
    if !violations.is_empty() {
        return Err(ImportFailure::Validation(violations));
    }

    let mut conflicts = Vec::new();
    for record in &records {
        conflicts.extend(
            uniqueness::check_for_create(pool, record)
                .await
                .map_err(storage_failure)?,
        );
    }
    if !conflicts.is_empty() {
        return Err(ImportFailure::Uniqueness(conflicts));
    }

    let mut groups = Vec::with_capacity(records.len());
    for record in &records {
        let group = CreateStudyGroup::from_record(record).map_err(|err| {
            tracing::error!(error = %err, "Record mapping failed after validation");
            ImportFailure::persistence()
        })?;
        groups.push(group);
    }

    GroupRepo::insert_batch(pool, &groups)
        .await
        .map_err(storage_failure)?;
    Ok(groups.len())
}

/// Map a storage error onto the import taxonomy.
///
/// Unique-index violations become uniqueness conflicts on the matching
/// field; the indexes catch concurrent writers and in-file duplicates that
/// the per-record checker cannot see. Everything else degrades to the
/// generic, non-leaking persistence descriptor.
fn storage_failure(err: sqlx::Error) -> ImportFailure {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            if let Some((field, message)) = unique_constraint_field(db_err.constraint()) {
                return ImportFailure::Uniqueness(vec![ImportError::new(
                    WHOLE_FILE, field, message,
                )]);
            }
        }
    }
    tracing::error!(error = %err, "Import storage failure");
    ImportFailure::persistence()
}

fn unique_constraint_field(constraint: Option<&str>) -> Option<(&'static str, &'static str)> {
    match constraint? {
        "uq_study_groups_name" => Some(("name", uniqueness::NAME_TAKEN)),
        "uq_study_groups_coordinates" => Some(("coordinates", uniqueness::COORDINATES_TAKEN)),
        "uq_study_groups_admin_passport_id" => {
            Some(("groupAdmin.passportID", uniqueness::PASSPORT_TAKEN))
        }
        _ => None,
    }
}

// The journal is advisory over the import's correctness: a failure to
// finalize it is logged, never allowed to mask the primary outcome.

async fn finalize_completed(pool: &PgPool, operation_id: DbId, imported_count: usize) {
    if let Err(err) = ImportOperationRepo::mark_completed(pool, operation_id, imported_count as i32).await
    {
        tracing::warn!(operation_id, error = %err, "Failed to mark journal entry completed");
    }
}

async fn finalize_failed(pool: &PgPool, operation_id: DbId, summary: &str) {
    if let Err(err) = ImportOperationRepo::mark_failed(pool, operation_id, summary).await {
        tracing::warn!(operation_id, error = %err, "Failed to mark journal entry failed");
    }
}
