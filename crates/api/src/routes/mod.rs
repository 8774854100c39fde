pub mod groups;
pub mod health;
pub mod imports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /groups              list (GET), create (POST)
/// /groups/{id}         get, update (PUT), delete
/// /groups/import       bulk import (POST, multipart)
/// /imports             import journal listing (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(groups::router()).merge(imports::router())
}
