//! Storage seam between the HTTP layer and the persistence backends.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use bugtrack_core::types::DbId;

use crate::models::bug::{Bug, BugFields};

pub use memory::InMemoryBugStore;
pub use postgres::PgBugStore;

/// Opaque key-addressed collection of bug records.
///
/// Every call touches at most one record; there are no cross-record
/// transactions and concurrent writes to one record are last-write-wins.
#[async_trait]
pub trait BugStore: Send + Sync {
    /// All bugs, newest first by creation time.
    async fn list(&self) -> Result<Vec<Bug>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Bug>, sqlx::Error>;

    /// Persist a new bug; the store assigns id and timestamps.
    async fn create(&self, fields: &BugFields) -> Result<Bug, sqlx::Error>;

    /// Replace a bug's fields, `None` if the id does not resolve.
    async fn update(&self, id: DbId, fields: &BugFields) -> Result<Option<Bug>, sqlx::Error>;

    /// Remove a bug, `false` if the id does not resolve.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

pub type SharedBugStore = Arc<dyn BugStore>;
