use bugtrack_db::store::SharedBugStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the store is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Bug persistence backend (PostgreSQL or in-memory).
    pub store: SharedBugStore,
}
