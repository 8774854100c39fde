//! Route definitions for study-group CRUD.

use axum::routing::get;
use axum::Router;

use crate::handlers::groups;
use crate::state::AppState;

/// Group routes mounted at `/groups`.
///
/// ```text
/// GET    /groups        -> list_groups
/// POST   /groups        -> create_group
/// GET    /groups/{id}   -> get_group
/// PUT    /groups/{id}   -> update_group
/// DELETE /groups/{id}   -> delete_group
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route(
            "/groups/{id}",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
}
