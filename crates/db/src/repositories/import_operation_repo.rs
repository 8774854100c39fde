//! Repository for the import-operation journal.
//!
//! Every method here executes single auto-committed statements on the
//! pool, outside any caller transaction: a journal write must survive even
//! if the import it describes is rolled back. Finalizing a missing or
//! already-terminal entry is a silent no-op (0 rows updated).

use sqlx::PgPool;
use studygroup_core::import::{truncate_chars, ERROR_SUMMARY_MAX_CHARS};
use studygroup_core::types::DbId;

use crate::models::import_operation::ImportOperation;

/// Column list for `import_operations` queries.
const OPERATION_COLUMNS: &str =
    "id, status, username, role, imported_count, error_message, created_at, finished_at";

/// Provides lifecycle and listing operations for import journal entries.
pub struct ImportOperationRepo;

impl ImportOperationRepo {
    /// Insert a RUNNING entry for a fresh import attempt.
    pub async fn create_running(
        pool: &PgPool,
        username: &str,
        role: &str,
    ) -> Result<ImportOperation, sqlx::Error> {
        let sql = format!(
            "INSERT INTO import_operations (status, username, role) \
             VALUES ('RUNNING', $1, $2) \
             RETURNING {OPERATION_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(username)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Transition a RUNNING entry to COMPLETED with its imported count.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        imported_count: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE import_operations SET \
                status = 'COMPLETED', imported_count = $2, finished_at = now() \
             WHERE id = $1 AND status = 'RUNNING'",
        )
        .bind(id)
        .bind(imported_count)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Transition a RUNNING entry to FAILED with a bounded synopsis.
    pub async fn mark_failed(pool: &PgPool, id: DbId, message: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE import_operations SET \
                status = 'FAILED', error_message = $2, finished_at = now() \
             WHERE id = $1 AND status = 'RUNNING'",
        )
        .bind(id)
        .bind(truncate_chars(message, ERROR_SUMMARY_MAX_CHARS))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a journal entry by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ImportOperation>, sqlx::Error> {
        let sql = format!("SELECT {OPERATION_COLUMNS} FROM import_operations WHERE id = $1");
        sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
    }

    /// List every journal entry, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ImportOperation>, sqlx::Error> {
        let sql = format!(
            "SELECT {OPERATION_COLUMNS} FROM import_operations \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as(&sql).fetch_all(pool).await
    }

    /// List one user's journal entries, newest first.
    pub async fn list_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Vec<ImportOperation>, sqlx::Error> {
        let sql = format!(
            "SELECT {OPERATION_COLUMNS} FROM import_operations \
             WHERE username = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as(&sql).bind(username).fetch_all(pool).await
    }
}
