//! Bug list state.
//!
//! Every mutation is followed by a full re-read of the list, so `bugs`
//! mirrors the server after a successful call. A failed re-read is kept in
//! `error` and `phase`; it never turns a completed write into an error.

use bugtrack_core::types::DbId;

use super::{failure_message, Phase};
use crate::error::{ClientError, ClientResult};
use crate::filters::BugFilters;
use crate::models::{Bug, BugDraft};
use crate::services::BugService;

pub const FETCH_FAILED: &str = "Failed to fetch bugs";
pub const CREATE_FAILED: &str = "Failed to create bug";
pub const UPDATE_FAILED: &str = "Failed to update bug";
pub const DELETE_FAILED: &str = "Failed to delete bug";

pub struct BugsController {
    service: BugService,
    bugs: Vec<Bug>,
    phase: Phase,
    error: Option<String>,
    filters: BugFilters,
}

impl BugsController {
    pub fn new(service: BugService, filters: BugFilters) -> Self {
        Self {
            service,
            bugs: Vec::new(),
            phase: Phase::Idle,
            error: None,
            filters,
        }
    }

    pub fn bugs(&self) -> &[Bug] {
        &self.bugs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &BugFilters {
        &self.filters
    }

    pub fn find(&self, id: DbId) -> Option<&Bug> {
        self.bugs.iter().find(|bug| bug.id == id)
    }

    /// Re-read the full list with the current filters.
    pub async fn fetch_bugs(&mut self) -> ClientResult<()> {
        self.phase = Phase::Loading;
        self.error = None;

        match self.service.get_bugs(&self.filters).await {
            Ok(bugs) => {
                tracing::debug!(count = bugs.len(), "Fetched bugs");
                self.bugs = bugs;
                self.phase = Phase::Success;
                Ok(())
            }
            Err(err) => Err(self.fail(err, FETCH_FAILED)),
        }
    }

    pub async fn set_filters(&mut self, filters: BugFilters) -> ClientResult<()> {
        self.filters = filters;
        self.fetch_bugs().await
    }

    pub async fn create_bug(&mut self, draft: &BugDraft) -> ClientResult<Bug> {
        self.phase = Phase::Loading;

        let created = match self.service.create_bug(draft).await {
            Ok(bug) => bug,
            Err(err) => return Err(self.fail(err, CREATE_FAILED)),
        };
        self.refresh().await;
        Ok(created)
    }

    pub async fn update_bug(&mut self, id: DbId, draft: &BugDraft) -> ClientResult<Bug> {
        self.phase = Phase::Loading;

        let updated = match self.service.update_bug(id, draft).await {
            Ok(bug) => bug,
            Err(err) => return Err(self.fail(err, UPDATE_FAILED)),
        };
        self.refresh().await;
        Ok(updated)
    }

    pub async fn delete_bug(&mut self, id: DbId) -> ClientResult<()> {
        self.phase = Phase::Loading;

        if let Err(err) = self.service.delete_bug(id).await {
            return Err(self.fail(err, DELETE_FAILED));
        }
        self.refresh().await;
        Ok(())
    }

    /// Change only the status of a loaded bug. The update endpoint replaces
    /// every field, so the rest of the record is sent back unchanged.
    pub async fn update_status(&mut self, id: DbId, status: &str) -> ClientResult<Bug> {
        let mut draft = match self.find(id) {
            Some(current) => BugDraft::from(current),
            None => return Err(self.fail(ClientError::NotFound(id), UPDATE_FAILED)),
        };
        draft.status = status.to_string();
        self.update_bug(id, &draft).await
    }

    /// Re-read after a write that already succeeded on the server.
    async fn refresh(&mut self) {
        if let Err(err) = self.fetch_bugs().await {
            tracing::warn!(error = %err, "Bug list refresh failed after a write");
        }
    }

    fn fail(&mut self, err: ClientError, fallback: &str) -> ClientError {
        let message = failure_message(&err, fallback);
        tracing::debug!(error = %err, %message, "Bug request failed");
        self.error = Some(message);
        self.phase = Phase::Error;
        err
    }
}
