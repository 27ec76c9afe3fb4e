//! Bug entity model and DTOs.
//!
//! Rows use snake_case columns; the JSON wire format is camelCase
//! (`stepsToReproduce`, `createdAt`, ...).

use bugtrack_core::bug::{self, BugCandidate};
use bugtrack_core::error::CoreError;
use bugtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Where the bug was observed. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugEnvironment {
    pub os: Option<String>,
    pub browser: Option<String>,
    pub version: Option<String>,
}

/// A row from the `bugs` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub reporter: String,
    pub assignee: String,
    pub steps_to_reproduce: Vec<String>,
    pub environment: Option<Json<BugEnvironment>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Bug {
    /// Overwrite this record with a validated write set. Optional fields
    /// absent from the payload keep their stored value.
    pub fn apply(&mut self, fields: &BugFields, now: Timestamp) {
        self.title.clone_from(&fields.title);
        self.description.clone_from(&fields.description);
        self.status.clone_from(&fields.status);
        self.priority.clone_from(&fields.priority);
        self.reporter.clone_from(&fields.reporter);
        if let Some(assignee) = &fields.assignee {
            self.assignee.clone_from(assignee);
        }
        if let Some(steps) = &fields.steps_to_reproduce {
            self.steps_to_reproduce.clone_from(steps);
        }
        if let Some(environment) = &fields.environment {
            self.environment = Some(Json(environment.clone()));
        }
        self.updated_at = now;
    }
}

/// Request body for create and update, exactly as the client sent it.
///
/// Unknown keys (e.g. a client-side `project`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub reporter: Option<String>,
    pub assignee: Option<String>,
    pub steps_to_reproduce: Option<Vec<String>>,
    pub environment: Option<BugEnvironment>,
}

impl BugInput {
    /// Borrow the five checked fields for the validation chain.
    pub fn candidate(&self) -> BugCandidate<'_> {
        BugCandidate {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            status: self.status.as_deref(),
            priority: self.priority.as_deref(),
            reporter: self.reporter.as_deref(),
        }
    }

    /// Run the validation chain and, on success, produce the trimmed write set.
    pub fn validate(self) -> Result<BugFields, CoreError> {
        bug::ensure_valid(&self.candidate())?;

        Ok(BugFields {
            title: trim_owned(self.title),
            description: trim_owned(self.description),
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            reporter: trim_owned(self.reporter),
            assignee: self.assignee.map(|a| a.trim().to_string()),
            steps_to_reproduce: self.steps_to_reproduce,
            environment: self.environment,
        })
    }
}

fn trim_owned(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// A validated write set. Only [`BugInput::validate`] builds one, so the
/// required fields always satisfy the validation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugFields {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub reporter: String,
    pub assignee: Option<String>,
    pub steps_to_reproduce: Option<Vec<String>>,
    pub environment: Option<BugEnvironment>,
}
