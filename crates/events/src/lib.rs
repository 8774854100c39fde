//! Change-event infrastructure for the study-group registry.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`GroupChangedEvent`]: the change-event value published whenever a
//!   group is created, updated, or deleted.
//!
//! Delivery is fire-and-forget: publishing never blocks and an event with
//! zero subscribers is simply dropped.

pub mod bus;

pub use bus::{ChangeType, EventBus, GroupChangedEvent};
