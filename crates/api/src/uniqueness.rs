//! Business-uniqueness checks against the durable store.
//!
//! Three attributes are business-unique across groups: the name
//! (case-insensitive), the exact coordinate pair, and the admin's passport
//! identifier when present. All applicable checks run before reporting, so
//! one call can yield up to three descriptors; an empty list means no
//! conflict.
//!
//! The checks read the store without locking. The unique indexes on the
//! table remain the authoritative guard against concurrent writers.

use sqlx::PgPool;
use studygroup_core::group::GroupRecord;
use studygroup_core::import::{ImportError, WHOLE_FILE};
use studygroup_core::types::DbId;
use studygroup_db::repositories::GroupRepo;

pub const NAME_TAKEN: &str = "Group name must be unique";
pub const COORDINATES_TAKEN: &str = "Coordinates (x,y) must be unique";
pub const PASSPORT_TAKEN: &str = "passportID must be unique among group admins";

/// Conflicts for a record about to be created.
pub async fn check_for_create(
    pool: &PgPool,
    record: &GroupRecord,
) -> Result<Vec<ImportError>, sqlx::Error> {
    check(pool, None, record).await
}

/// Conflicts for a record replacing the group `id`; matches against the
/// group's own row are not conflicts.
pub async fn check_for_update(
    pool: &PgPool,
    id: DbId,
    record: &GroupRecord,
) -> Result<Vec<ImportError>, sqlx::Error> {
    check(pool, Some(id), record).await
}

async fn check(
    pool: &PgPool,
    current_id: Option<DbId>,
    record: &GroupRecord,
) -> Result<Vec<ImportError>, sqlx::Error> {
    let mut errors = Vec::new();
    let conflicts = |found: Option<DbId>| found.is_some_and(|id| current_id != Some(id));

    if let Some(name) = record.name.as_deref() {
        if conflicts(GroupRepo::find_id_by_name_ci(pool, name).await?) {
            errors.push(ImportError::new(WHOLE_FILE, "name", NAME_TAKEN));
        }
    }

    if let Some(coordinates) = &record.coordinates {
        if let Some(y) = coordinates.y {
            if conflicts(GroupRepo::find_id_by_coordinates(pool, coordinates.x, y).await?) {
                errors.push(ImportError::new(WHOLE_FILE, "coordinates", COORDINATES_TAKEN));
            }
        }
    }

    if let Some(passport) = record
        .group_admin
        .as_ref()
        .and_then(|admin| admin.passport_id.as_deref())
    {
        if conflicts(GroupRepo::find_id_by_admin_passport(pool, passport).await?) {
            errors.push(ImportError::new(
                WHOLE_FILE,
                "groupAdmin.passportID",
                PASSPORT_TAKEN,
            ));
        }
    }

    Ok(errors)
}
