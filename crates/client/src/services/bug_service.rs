//! One call per `/bugs` operation, plus the health probe.

use bugtrack_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::filters::BugFilters;
use crate::models::{Bug, BugDraft, HealthStatus};

#[derive(Clone)]
pub struct BugService {
    api: ApiClient,
}

impl BugService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /bugs`. The server currently ignores the filter parameters.
    pub async fn get_bugs(&self, filters: &BugFilters) -> ClientResult<Vec<Bug>> {
        self.api
            .get("/bugs", &filters.to_query())
            .await?
            .into_list()
    }

    pub async fn get_bug(&self, id: DbId) -> ClientResult<Bug> {
        self.api.get(&format!("/bugs/{id}"), &[]).await?.into_data()
    }

    pub async fn create_bug(&self, draft: &BugDraft) -> ClientResult<Bug> {
        self.api.post("/bugs", draft).await?.into_data()
    }

    /// `PUT /bugs/{id}`; the draft replaces every checked field.
    pub async fn update_bug(&self, id: DbId, draft: &BugDraft) -> ClientResult<Bug> {
        self.api
            .put(&format!("/bugs/{id}"), draft)
            .await?
            .into_data()
    }

    /// Returns the server's acknowledgement message.
    pub async fn delete_bug(&self, id: DbId) -> ClientResult<String> {
        let envelope = self
            .api
            .delete::<serde_json::Value>(&format!("/bugs/{id}"))
            .await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// `GET /health`. The body is flat, not wrapped in `data`.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.api.get_plain("/health").await
    }
}
