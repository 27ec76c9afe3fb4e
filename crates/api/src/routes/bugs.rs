//! Route definitions for bug records.
//!
//! Mounted at `/bugs` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::bugs;
use crate::state::AppState;

/// Bug routes.
///
/// ```text
/// GET    /                  -> list_bugs
/// POST   /                  -> create_bug
/// GET    /{id}              -> get_bug
/// PUT    /{id}              -> update_bug
/// DELETE /{id}              -> delete_bug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bugs::list_bugs).post(bugs::create_bug))
        .route(
            "/{id}",
            get(bugs::get_bug)
                .put(bugs::update_bug)
                .delete(bugs::delete_bug),
        )
}
