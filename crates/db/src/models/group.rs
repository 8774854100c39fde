//! Study-group entity models and DTOs.
//!
//! The table stores one flat row per group; the owned value objects
//! (coordinates, admin person, admin location) are embedded columns and
//! re-composed into nested structs when rows are read back.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use studygroup_core::error::CoreError;
use studygroup_core::group::{Color, Country, FormOfEducation, GroupRecord, Semester};
use studygroup_core::types::DbId;

// ---------------------------------------------------------------------------
// Persisted entity
// ---------------------------------------------------------------------------

/// A durable study group with its generated identity and creation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    pub id: DbId,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: NaiveDate,
    pub students_count: i32,
    pub expelled_students: i64,
    pub transferred_students: i32,
    pub form_of_education: Option<FormOfEducation>,
    pub should_be_expelled: i32,
    pub average_mark: f64,
    #[serde(rename = "semesterEnum")]
    pub semester: Semester,
    pub group_admin: Person,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub x: f64,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub eye_color: Color,
    pub hair_color: Color,
    pub location: Option<Location>,
    #[serde(rename = "passportID")]
    pub passport_id: Option<String>,
    pub nationality: Option<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub x: f32,
    pub y: i64,
    pub z: f32,
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Flat row as selected from `study_groups`.
#[derive(Debug, FromRow)]
pub struct GroupRow {
    pub id: DbId,
    pub name: String,
    pub coord_x: f64,
    pub coord_y: i32,
    pub creation_date: NaiveDate,
    pub students_count: i32,
    pub expelled_students: i64,
    pub transferred_students: i32,
    pub form_of_education: Option<String>,
    pub should_be_expelled: i32,
    pub average_mark: f64,
    pub semester: String,
    pub admin_name: String,
    pub admin_eye_color: String,
    pub admin_hair_color: String,
    pub admin_passport_id: Option<String>,
    pub admin_nationality: Option<String>,
    pub admin_location_x: Option<f32>,
    pub admin_location_y: Option<i64>,
    pub admin_location_z: Option<f32>,
}

fn decode_error(column: &str, value: &str) -> sqlx::Error {
    sqlx::Error::Decode(format!("unrecognized {column} value '{value}'").into())
}

impl TryFrom<GroupRow> for StudyGroup {
    type Error = sqlx::Error;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let form_of_education = row
            .form_of_education
            .as_deref()
            .map(|s| FormOfEducation::parse(s).ok_or_else(|| decode_error("form_of_education", s)))
            .transpose()?;
        let semester = Semester::parse(&row.semester)
            .ok_or_else(|| decode_error("semester", &row.semester))?;
        let eye_color = Color::parse(&row.admin_eye_color)
            .ok_or_else(|| decode_error("admin_eye_color", &row.admin_eye_color))?;
        let hair_color = Color::parse(&row.admin_hair_color)
            .ok_or_else(|| decode_error("admin_hair_color", &row.admin_hair_color))?;
        let nationality = row
            .admin_nationality
            .as_deref()
            .map(|s| Country::parse(s).ok_or_else(|| decode_error("admin_nationality", s)))
            .transpose()?;

        let location = row.admin_location_y.map(|y| Location {
            x: row.admin_location_x.unwrap_or(0.0),
            y,
            z: row.admin_location_z.unwrap_or(0.0),
        });

        Ok(StudyGroup {
            id: row.id,
            name: row.name,
            coordinates: Coordinates {
                x: row.coord_x,
                y: row.coord_y,
            },
            creation_date: row.creation_date,
            students_count: row.students_count,
            expelled_students: row.expelled_students,
            transferred_students: row.transferred_students,
            form_of_education,
            should_be_expelled: row.should_be_expelled,
            average_mark: row.average_mark,
            semester,
            group_admin: Person {
                name: row.admin_name,
                eye_color,
                hair_color,
                location,
                passport_id: row.admin_passport_id,
                nationality,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Insert-ready study group with every required field concrete.
///
/// Built from a validated [`GroupRecord`]; a missing required field here
/// means the caller skipped validation, and maps to a domain error rather
/// than a panic.
#[derive(Debug, Clone)]
pub struct CreateStudyGroup {
    pub name: String,
    pub coord_x: f64,
    pub coord_y: i32,
    pub students_count: i32,
    pub expelled_students: i64,
    pub transferred_students: i32,
    pub form_of_education: Option<FormOfEducation>,
    pub should_be_expelled: i32,
    pub average_mark: f64,
    pub semester: Semester,
    pub admin_name: String,
    pub admin_eye_color: Color,
    pub admin_hair_color: Color,
    pub admin_passport_id: Option<String>,
    pub admin_nationality: Option<Country>,
    pub admin_location: Option<CreateLocation>,
}

#[derive(Debug, Clone, Copy)]
pub struct CreateLocation {
    pub x: f32,
    pub y: i64,
    pub z: f32,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} must not be null")))
}

impl CreateStudyGroup {
    /// Map a candidate record to its insert-ready shape.
    pub fn from_record(record: &GroupRecord) -> Result<Self, CoreError> {
        let coordinates = required(record.coordinates.as_ref(), "coordinates")?;
        let admin = required(record.group_admin.as_ref(), "groupAdmin")?;

        let admin_location = admin
            .location
            .as_ref()
            .map(|loc| {
                Ok::<_, CoreError>(CreateLocation {
                    x: loc.x,
                    y: required(loc.y, "groupAdmin.location.y")?,
                    z: loc.z,
                })
            })
            .transpose()?;

        Ok(Self {
            name: required(record.name.clone(), "name")?,
            coord_x: coordinates.x,
            coord_y: required(coordinates.y, "coordinates.y")?,
            students_count: record.students_count,
            expelled_students: record.expelled_students,
            transferred_students: record.transferred_students,
            form_of_education: record.form_of_education,
            should_be_expelled: required(record.should_be_expelled, "shouldBeExpelled")?,
            average_mark: record.average_mark,
            semester: required(record.semester, "semesterEnum")?,
            admin_name: required(admin.name.clone(), "groupAdmin.name")?,
            admin_eye_color: required(admin.eye_color, "groupAdmin.eyeColor")?,
            admin_hair_color: required(admin.hair_color, "groupAdmin.hairColor")?,
            admin_passport_id: admin.passport_id.clone(),
            admin_nationality: admin.nationality,
            admin_location,
        })
    }
}
