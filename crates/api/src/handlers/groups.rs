//! Handlers for study-group CRUD.
//!
//! Create and update run the same field validator as the import pipeline
//! (descriptors carry record index -1 outside a batch) followed by the
//! uniqueness checker, then publish a change event on success.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use studygroup_core::error::CoreError;
use studygroup_core::group::GroupRecord;
use studygroup_core::import::validate;
use studygroup_core::types::DbId;
use studygroup_db::models::group::{CreateStudyGroup, StudyGroup};
use studygroup_db::repositories::GroupRepo;
use studygroup_events::{ChangeType, GroupChangedEvent};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::uniqueness;

/// Query parameters for the group listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive name substring filter.
    pub name: Option<String>,
}

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<StudyGroup>>> {
    let groups = GroupRepo::list(&state.pool, params.name.as_deref()).await?;
    Ok(Json(groups))
}

/// GET /api/groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudyGroup>> {
    let group = GroupRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "StudyGroup",
            id,
        })?;
    Ok(Json(group))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(record): Json<GroupRecord>,
) -> AppResult<(StatusCode, Json<StudyGroup>)> {
    let violations = validate::validate_one(&record);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let conflicts = uniqueness::check_for_create(&state.pool, &record).await?;
    if !conflicts.is_empty() {
        return Err(AppError::Unique(conflicts));
    }

    let group = GroupRepo::create(&state.pool, &CreateStudyGroup::from_record(&record)?).await?;
    state
        .event_bus
        .publish(GroupChangedEvent::new(group.id, ChangeType::Created));

    Ok((StatusCode::CREATED, Json(group)))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(record): Json<GroupRecord>,
) -> AppResult<Json<StudyGroup>> {
    let violations = validate::validate_one(&record);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let conflicts = uniqueness::check_for_update(&state.pool, id, &record).await?;
    if !conflicts.is_empty() {
        return Err(AppError::Unique(conflicts));
    }

    let updated = GroupRepo::update(&state.pool, id, &CreateStudyGroup::from_record(&record)?)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "StudyGroup",
            id,
        })?;
    state
        .event_bus
        .publish(GroupChangedEvent::new(id, ChangeType::Updated));

    Ok(Json(updated))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GroupRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "StudyGroup",
            id,
        }
        .into());
    }
    state
        .event_bus
        .publish(GroupChangedEvent::new(id, ChangeType::Deleted));

    Ok(StatusCode::NO_CONTENT)
}
