//! Primitive aliases shared across the workspace.

/// Identity of a persisted row (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// UTC instant, matching `TIMESTAMPTZ` columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
