//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studygroup_core::types::DbId;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// GroupChangedEvent
// ---------------------------------------------------------------------------

/// What happened to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Created,
    Updated,
    Deleted,
}

/// A change to a study group, as consumed by notification sinks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChangedEvent {
    pub group_id: DbId,
    pub change: ChangeType,
    pub timestamp: DateTime<Utc>,
}

impl GroupChangedEvent {
    pub fn new(group_id: DbId, change: ChangeType) -> Self {
        Self {
            group_id,
            change,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// In-process fan-out bus for [`GroupChangedEvent`]s.
///
/// Designed to be shared via `Arc<EventBus>` across the application. When
/// the buffer is full the oldest un-consumed events are dropped and slow
/// receivers observe a `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<GroupChangedEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// A send error only means there are zero receivers; it is ignored.
    pub fn publish(&self, event: GroupChangedEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<GroupChangedEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
