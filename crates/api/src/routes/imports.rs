//! Route definitions for bulk import and the import journal.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Import routes.
///
/// ```text
/// POST /groups/import   -> import_file (multipart)
/// GET  /imports         -> list_operations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups/import", post(imports::import_file))
        .route("/imports", get(imports::list_operations))
}
