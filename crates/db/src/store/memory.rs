//! In-memory storage backend.
//!
//! Used for tests and for running the API without PostgreSQL
//! (`BUG_STORE=memory`). Records live in a `BTreeMap` behind a tokio
//! `RwLock`; ids come from a counter that never reuses a value, so a
//! deleted id stays unresolvable.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bugtrack_core::types::DbId;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::BugStore;
use crate::models::bug::{Bug, BugFields};

#[derive(Default)]
struct Inner {
    bugs: BTreeMap<DbId, Bug>,
    last_id: DbId,
}

#[derive(Default)]
pub struct InMemoryBugStore {
    inner: RwLock<Inner>,
}

impl InMemoryBugStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, keeping its id and timestamps.
    ///
    /// Later creates are assigned ids above any seeded one.
    pub async fn seed(&self, bug: Bug) {
        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(bug.id);
        inner.bugs.insert(bug.id, bug);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.bugs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BugStore for InMemoryBugStore {
    async fn list(&self) -> Result<Vec<Bug>, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut bugs: Vec<Bug> = inner.bugs.values().cloned().collect();
        bugs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(bugs)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Bug>, sqlx::Error> {
        Ok(self.inner.read().await.bugs.get(&id).cloned())
    }

    async fn create(&self, fields: &BugFields) -> Result<Bug, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();

        let bug = Bug {
            id: inner.last_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status.clone(),
            priority: fields.priority.clone(),
            reporter: fields.reporter.clone(),
            assignee: fields.assignee.clone().unwrap_or_default(),
            steps_to_reproduce: fields.steps_to_reproduce.clone().unwrap_or_default(),
            environment: fields.environment.clone().map(Json),
            created_at: now,
            updated_at: now,
        };

        inner.bugs.insert(bug.id, bug.clone());
        tracing::debug!(bug_id = bug.id, "Stored bug in memory");
        Ok(bug)
    }

    async fn update(&self, id: DbId, fields: &BugFields) -> Result<Option<Bug>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        Ok(inner.bugs.get_mut(&id).map(|bug| {
            bug.apply(fields, Utc::now());
            bug.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.bugs.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
