use async_trait::async_trait;
use bugtrack_core::types::DbId;

use super::BugStore;
use crate::models::bug::{Bug, BugFields};
use crate::repositories::BugRepo;
use crate::DbPool;

/// [`BugStore`] backed by PostgreSQL via [`BugRepo`].
#[derive(Clone)]
pub struct PgBugStore {
    pool: DbPool,
}

impl PgBugStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BugStore for PgBugStore {
    async fn list(&self) -> Result<Vec<Bug>, sqlx::Error> {
        BugRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Bug>, sqlx::Error> {
        BugRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, fields: &BugFields) -> Result<Bug, sqlx::Error> {
        BugRepo::create(&self.pool, fields).await
    }

    async fn update(&self, id: DbId, fields: &BugFields) -> Result<Option<Bug>, sqlx::Error> {
        BugRepo::update(&self.pool, id, fields).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        BugRepo::delete(&self.pool, id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
