pub mod group;
pub mod import_operation;
