//! Domain types and pure logic for the study-group registry.
//!
//! This crate has no database or HTTP dependencies. It provides:
//!
//! - [`group`]: the study-group record shape, its nested value objects,
//!   and the domain enums.
//! - [`import`]: the bulk-import pipeline stages that are pure functions
//!   of their input, plus the error taxonomy shared by every stage.
//! - [`error`]: the domain-level error type.

pub mod error;
pub mod group;
pub mod import;
pub mod types;
