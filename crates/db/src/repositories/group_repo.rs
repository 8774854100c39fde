//! Repository for study groups.

use sqlx::{PgPool, Postgres, Transaction};
use studygroup_core::types::DbId;

use crate::models::group::{CreateStudyGroup, GroupRow, StudyGroup};

/// Column list for `study_groups` queries.
const GROUP_COLUMNS: &str =
    "id, name, coord_x, coord_y, creation_date, students_count, expelled_students, \
     transferred_students, form_of_education, should_be_expelled, average_mark, semester, \
     admin_name, admin_eye_color, admin_hair_color, admin_passport_id, admin_nationality, \
     admin_location_x, admin_location_y, admin_location_z";

/// Columns written on insert; `id` and `creation_date` are generated.
const INSERT_COLUMNS: &str =
    "name, coord_x, coord_y, students_count, expelled_students, transferred_students, \
     form_of_education, should_be_expelled, average_mark, semester, admin_name, \
     admin_eye_color, admin_hair_color, admin_passport_id, admin_nationality, \
     admin_location_x, admin_location_y, admin_location_z";

const INSERT_PLACEHOLDERS: &str =
    "$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18";

/// Provides CRUD and uniqueness-lookup operations for study groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert one group inside an existing transaction, returning its id.
    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        group: &CreateStudyGroup,
    ) -> Result<DbId, sqlx::Error> {
        let sql = format!(
            "INSERT INTO study_groups ({INSERT_COLUMNS}) \
             VALUES ({INSERT_PLACEHOLDERS}) \
             RETURNING id"
        );
        sqlx::query_scalar(&sql)
            .bind(&group.name)
            .bind(group.coord_x)
            .bind(group.coord_y)
            .bind(group.students_count)
            .bind(group.expelled_students)
            .bind(group.transferred_students)
            .bind(group.form_of_education.map(|f| f.as_str()))
            .bind(group.should_be_expelled)
            .bind(group.average_mark)
            .bind(group.semester.as_str())
            .bind(&group.admin_name)
            .bind(group.admin_eye_color.as_str())
            .bind(group.admin_hair_color.as_str())
            .bind(&group.admin_passport_id)
            .bind(group.admin_nationality.map(|n| n.as_str()))
            .bind(group.admin_location.map(|l| l.x))
            .bind(group.admin_location.map(|l| l.y))
            .bind(group.admin_location.map(|l| l.z))
            .fetch_one(&mut **tx)
            .await
    }

    /// Persist a whole batch as one atomic unit.
    ///
    /// Any failure rolls back every insert; no partial batch is ever
    /// visible.
    pub async fn insert_batch(
        pool: &PgPool,
        groups: &[CreateStudyGroup],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut ids = Vec::with_capacity(groups.len());
        for group in groups {
            ids.push(Self::insert_tx(&mut tx, group).await?);
        }
        tx.commit().await?;
        Ok(ids)
    }

    /// Create a single group and return the persisted entity.
    pub async fn create(pool: &PgPool, group: &CreateStudyGroup) -> Result<StudyGroup, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id = Self::insert_tx(&mut tx, group).await?;
        tx.commit().await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a group by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StudyGroup>, sqlx::Error> {
        let sql = format!("SELECT {GROUP_COLUMNS} FROM study_groups WHERE id = $1");
        let row: Option<GroupRow> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
        row.map(StudyGroup::try_from).transpose()
    }

    /// List groups ordered by id, optionally filtered by a name substring
    /// (case-insensitive).
    pub async fn list(
        pool: &PgPool,
        name_contains: Option<&str>,
    ) -> Result<Vec<StudyGroup>, sqlx::Error> {
        let sql = format!(
            "SELECT {GROUP_COLUMNS} FROM study_groups \
             WHERE $1::text IS NULL OR name ILIKE '%' || $1 || '%' \
             ORDER BY id"
        );
        let rows: Vec<GroupRow> = sqlx::query_as(&sql)
            .bind(name_contains)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(StudyGroup::try_from).collect()
    }

    /// Replace every caller-supplied field of an existing group.
    ///
    /// `creation_date` is preserved. Returns `None` if the id is unknown.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        group: &CreateStudyGroup,
    ) -> Result<Option<StudyGroup>, sqlx::Error> {
        let sql = format!(
            "UPDATE study_groups SET \
                name = $1, coord_x = $2, coord_y = $3, students_count = $4, \
                expelled_students = $5, transferred_students = $6, form_of_education = $7, \
                should_be_expelled = $8, average_mark = $9, semester = $10, admin_name = $11, \
                admin_eye_color = $12, admin_hair_color = $13, admin_passport_id = $14, \
                admin_nationality = $15, admin_location_x = $16, admin_location_y = $17, \
                admin_location_z = $18 \
             WHERE id = $19 \
             RETURNING {GROUP_COLUMNS}"
        );
        let row: Option<GroupRow> = sqlx::query_as(&sql)
            .bind(&group.name)
            .bind(group.coord_x)
            .bind(group.coord_y)
            .bind(group.students_count)
            .bind(group.expelled_students)
            .bind(group.transferred_students)
            .bind(group.form_of_education.map(|f| f.as_str()))
            .bind(group.should_be_expelled)
            .bind(group.average_mark)
            .bind(group.semester.as_str())
            .bind(&group.admin_name)
            .bind(group.admin_eye_color.as_str())
            .bind(group.admin_hair_color.as_str())
            .bind(&group.admin_passport_id)
            .bind(group.admin_nationality.map(|n| n.as_str()))
            .bind(group.admin_location.map(|l| l.x))
            .bind(group.admin_location.map(|l| l.y))
            .bind(group.admin_location.map(|l| l.z))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(StudyGroup::try_from).transpose()
    }

    /// Delete a group (and with it, its embedded value objects).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM study_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of persisted groups.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM study_groups")
            .fetch_one(pool)
            .await
    }

    // ── Uniqueness lookups ───────────────────────────────────────────────

    /// Id of the group holding this name, compared case-insensitively.
    pub async fn find_id_by_name_ci(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM study_groups WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Id of the group holding this exact coordinate pair.
    pub async fn find_id_by_coordinates(
        pool: &PgPool,
        x: f64,
        y: i32,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM study_groups WHERE coord_x = $1 AND coord_y = $2")
            .bind(x)
            .bind(y)
            .fetch_optional(pool)
            .await
    }

    /// Id of the group whose admin holds this passport identifier.
    pub async fn find_id_by_admin_passport(
        pool: &PgPool,
        passport_id: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM study_groups WHERE admin_passport_id = $1")
            .bind(passport_id)
            .fetch_optional(pool)
            .await
    }
}
