//! Study-group record shape and domain enums.
//!
//! [`GroupRecord`] is the wire-level candidate record: what a caller
//! submits when creating, updating, or bulk-importing a group. Fields that
//! the validator requires are `Option` so that their absence surfaces as a
//! field-validation finding rather than a parse failure; numeric fields
//! with documented defaults get them applied during deserialization.
//!
//! The wire format is camelCase JSON; unknown fields are rejected.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormOfEducation {
    DistanceEducation,
    FullTimeEducation,
    EveningClasses,
}

impl FormOfEducation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DistanceEducation => "DISTANCE_EDUCATION",
            Self::FullTimeEducation => "FULL_TIME_EDUCATION",
            Self::EveningClasses => "EVENING_CLASSES",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DISTANCE_EDUCATION" => Some(Self::DistanceEducation),
            "FULL_TIME_EDUCATION" => Some(Self::FullTimeEducation),
            "EVENING_CLASSES" => Some(Self::EveningClasses),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Second => "SECOND",
            Self::Third => "THIRD",
            Self::Fourth => "FOURTH",
            Self::Fifth => "FIFTH",
            Self::Sixth => "SIXTH",
            Self::Seventh => "SEVENTH",
            Self::Eighth => "EIGHTH",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FIRST" => Some(Self::First),
            "SECOND" => Some(Self::Second),
            "THIRD" => Some(Self::Third),
            "FOURTH" => Some(Self::Fourth),
            "FIFTH" => Some(Self::Fifth),
            "SIXTH" => Some(Self::Sixth),
            "SEVENTH" => Some(Self::Seventh),
            "EIGHTH" => Some(Self::Eighth),
            _ => None,
        }
    }
}

/// Eye and hair color of a group admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Green,
    Red,
    Black,
    White,
    Brown,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Red => "RED",
            Self::Black => "BLACK",
            Self::White => "WHITE",
            Self::Brown => "BROWN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "GREEN" => Some(Self::Green),
            "RED" => Some(Self::Red),
            "BLACK" => Some(Self::Black),
            "WHITE" => Some(Self::White),
            "BROWN" => Some(Self::Brown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    Russia,
    UnitedKingdom,
    Germany,
    Vatican,
    NorthKorea,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Russia => "RUSSIA",
            Self::UnitedKingdom => "UNITED_KINGDOM",
            Self::Germany => "GERMANY",
            Self::Vatican => "VATICAN",
            Self::NorthKorea => "NORTH_KOREA",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RUSSIA" => Some(Self::Russia),
            "UNITED_KINGDOM" => Some(Self::UnitedKingdom),
            "GERMANY" => Some(Self::Germany),
            "VATICAN" => Some(Self::Vatican),
            "NORTH_KOREA" => Some(Self::NorthKorea),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate record and nested value objects
// ---------------------------------------------------------------------------

/// A candidate study-group record as submitted by a caller.
///
/// Not yet assigned an identity; lives only for the duration of one
/// create/update/import call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupRecord {
    pub name: Option<String>,

    pub coordinates: Option<CoordinatesInput>,

    #[serde(default)]
    pub students_count: i32,

    #[serde(default = "default_one_i64")]
    pub expelled_students: i64,

    #[serde(default = "default_one_i32")]
    pub transferred_students: i32,

    pub form_of_education: Option<FormOfEducation>,

    /// Defaults to 1 when absent; an explicit `null` is a violation.
    #[serde(default = "default_some_one")]
    pub should_be_expelled: Option<i32>,

    #[serde(default = "default_average_mark")]
    pub average_mark: f64,

    #[serde(rename = "semesterEnum")]
    pub semester: Option<Semester>,

    pub group_admin: Option<PersonInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoordinatesInput {
    #[serde(default)]
    pub x: f64,
    pub y: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonInput {
    pub name: Option<String>,
    pub eye_color: Option<Color>,
    pub hair_color: Option<Color>,
    pub location: Option<LocationInput>,
    #[serde(rename = "passportID")]
    pub passport_id: Option<String>,
    pub nationality: Option<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LocationInput {
    #[serde(default)]
    pub x: f32,
    pub y: Option<i64>,
    #[serde(default)]
    pub z: f32,
}

fn default_one_i64() -> i64 {
    1
}

fn default_one_i32() -> i32 {
    1
}

fn default_some_one() -> Option<i32> {
    Some(1)
}

fn default_average_mark() -> f64 {
    1.0
}
