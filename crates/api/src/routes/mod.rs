pub mod bugs;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                 service health
///
/// /bugs, /bugs/           list, create
/// /bugs/{id}              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/bugs", bugs::router())
        // A nested "/" only matches "/bugs"; serve the trailing-slash form too.
        .route(
            "/bugs/",
            get(handlers::bugs::list_bugs).post(handlers::bugs::create_bug),
        )
}
