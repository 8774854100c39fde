//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod group_repo;
pub mod import_operation_repo;

pub use group_repo::GroupRepo;
pub use import_operation_repo::ImportOperationRepo;
