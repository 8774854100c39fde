//! Field validator: per-record constraint checks with full aggregation.
//!
//! Validation is a pure function from records to a list of typed findings;
//! it never short-circuits, so one pass reports every violation in every
//! record. Field paths use the wire names the caller submitted.

use super::{ImportError, WHOLE_FILE};
use crate::group::GroupRecord;

/// Inclusive upper bound for a coordinate's `y` component.
pub const COORDINATES_Y_MAX: i32 = 498;

/// Minimum length of a group admin's passport identifier, when present.
pub const PASSPORT_MIN_LEN: usize = 4;

const NOT_BLANK: &str = "must not be blank";
const NOT_NULL: &str = "must not be null";
const MIN_ZERO: &str = "must be greater than or equal to 0";
const MIN_ONE: &str = "must be greater than or equal to 1";

/// Validate every record in the batch, accumulating all violations.
///
/// An empty result means the whole batch passes.
pub fn validate_all(records: &[GroupRecord]) -> Vec<ImportError> {
    let mut errors = Vec::new();
    for (index, record) in records.iter().enumerate() {
        validate_record(index as i32, record, &mut errors);
    }
    errors
}

/// Validate a single record outside a batch context (record index -1).
pub fn validate_one(record: &GroupRecord) -> Vec<ImportError> {
    let mut errors = Vec::new();
    validate_record(WHOLE_FILE, record, &mut errors);
    errors
}

/// Check every field constraint of one record, pushing a descriptor per
/// violation.
pub fn validate_record(index: i32, record: &GroupRecord, errors: &mut Vec<ImportError>) {
    let mut violation = |field: &str, message: &str| {
        errors.push(ImportError::new(index, field, message));
    };

    if record.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
        violation("name", NOT_BLANK);
    }

    match &record.coordinates {
        None => violation("coordinates", NOT_NULL),
        Some(coordinates) => match coordinates.y {
            None => violation("coordinates.y", NOT_NULL),
            Some(y) if y > COORDINATES_Y_MAX => {
                violation("coordinates.y", "must be less than or equal to 498");
            }
            Some(_) => {}
        },
    }

    if record.students_count < 0 {
        violation("studentsCount", MIN_ZERO);
    }
    if record.expelled_students < 1 {
        violation("expelledStudents", MIN_ONE);
    }
    if record.transferred_students < 1 {
        violation("transferredStudents", MIN_ONE);
    }

    match record.should_be_expelled {
        None => violation("shouldBeExpelled", NOT_NULL),
        Some(n) if n < 1 => violation("shouldBeExpelled", MIN_ONE),
        Some(_) => {}
    }

    if record.average_mark < 1.0 {
        violation("averageMark", MIN_ONE);
    }

    if record.semester.is_none() {
        violation("semesterEnum", NOT_NULL);
    }

    match &record.group_admin {
        None => violation("groupAdmin", NOT_NULL),
        Some(admin) => {
            if admin.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
                violation("groupAdmin.name", NOT_BLANK);
            }
            if admin.eye_color.is_none() {
                violation("groupAdmin.eyeColor", NOT_NULL);
            }
            if admin.hair_color.is_none() {
                violation("groupAdmin.hairColor", NOT_NULL);
            }
            if let Some(passport) = &admin.passport_id {
                if passport.chars().count() < PASSPORT_MIN_LEN {
                    violation("groupAdmin.passportID", "must be at least 4 characters");
                }
            }
        }
    }
}
