//! Handlers for bulk import and the import journal.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use studygroup_core::import::ImportFailure;
use studygroup_core::types::{DbId, Timestamp};
use studygroup_db::models::import_operation::{ImportOperation, ImportStatus};
use studygroup_db::repositories::ImportOperationRepo;

use crate::actor::Actor;
use crate::error::{AppError, AppResult};
use crate::importing::{self, ImportResult};
use crate::state::AppState;

/// Journal entry as exposed to callers (the acting role stays internal).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOperationView {
    pub id: DbId,
    pub status: ImportStatus,
    pub username: String,
    pub imported_count: Option<i32>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

impl From<ImportOperation> for ImportOperationView {
    fn from(op: ImportOperation) -> Self {
        Self {
            id: op.id,
            status: op.status,
            username: op.username,
            imported_count: op.imported_count,
            error_message: op.error_message,
            created_at: op.created_at,
            finished_at: op.finished_at,
        }
    }
}

/// POST /api/groups/import
///
/// Accept a multipart upload with a single `file` field and run the import
/// pipeline over it.
pub async fn import_file(
    State(state): State<AppState>,
    actor: Actor,
    mut multipart: Multipart,
) -> AppResult<Json<ImportResult>> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((filename, content_type, data));
        break;
    }

    let Some((filename, content_type, data)) = upload else {
        return Err(ImportFailure::empty_file().into());
    };

    let result = importing::import_from_file(
        &state.pool,
        &data,
        &filename,
        content_type.as_deref(),
        &actor,
    )
    .await?;
    Ok(Json(result))
}

/// GET /api/imports
///
/// List import attempts, newest first. An admin role sees every entry;
/// anyone else sees only their own.
pub async fn list_operations(
    State(state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<Vec<ImportOperationView>>> {
    let operations = if actor.is_admin() {
        ImportOperationRepo::list_all(&state.pool).await?
    } else {
        ImportOperationRepo::list_by_username(&state.pool, &actor.username).await?
    };
    Ok(Json(operations.into_iter().map(Into::into).collect()))
}
