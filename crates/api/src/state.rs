use std::sync::Arc;

use crate::config::ServerConfig;

/// State shared by every handler.
///
/// Cloning is cheap: the pool is internally reference-counted and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: studygroup_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub event_bus: Arc<studygroup_events::EventBus>,
}
