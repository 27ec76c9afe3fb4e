//! Client-side view of the wire types.

use bugtrack_core::bug::{DEFAULT_PRIORITY, DEFAULT_STATUS};
use bugtrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Environment {
    pub fn is_empty(&self) -> bool {
        self.os.is_none() && self.browser.is_none() && self.version.is_none()
    }
}

/// A bug record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub reporter: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub steps_to_reproduce: Vec<String>,
    #[serde(default)]
    pub environment: Option<Environment>,
    /// Only present on bugs created through the form; the server drops it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for create and update. Updates always send every field, so a
/// draft is usually seeded from the current record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BugDraft {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub reporter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_to_reproduce: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl BugDraft {
    /// A new report with the default status and priority.
    pub fn new(title: &str, description: &str, reporter: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            status: DEFAULT_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            reporter: reporter.to_string(),
            assignee: None,
            steps_to_reproduce: None,
            environment: None,
            project: None,
        }
    }
}

impl From<&Bug> for BugDraft {
    fn from(bug: &Bug) -> Self {
        Self {
            title: bug.title.clone(),
            description: bug.description.clone(),
            status: bug.status.clone(),
            priority: bug.priority.clone(),
            reporter: bug.reporter.clone(),
            assignee: Some(bug.assignee.clone()),
            steps_to_reproduce: Some(bug.steps_to_reproduce.clone()),
            environment: bug.environment.clone(),
            project: bug.project.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

impl User {
    /// Name for greetings; falls back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// `data` of a login or registration response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub store_healthy: Option<bool>,
}
