//! Create/edit form state with the client-side required-field checks.
//!
//! These checks are looser than the server's validation chain; the server
//! still has the final word on lengths and allowed values.

use bugtrack_core::bug::{FieldError, DEFAULT_PRIORITY, DEFAULT_STATUS};

use crate::models::{Bug, BugDraft};

pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Description is required";
pub const MSG_PROJECT_REQUIRED: &str = "Project is required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugForm {
    pub title: String,
    pub description: String,
    pub project: String,
    pub priority: String,
}

impl Default for BugForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

impl BugForm {
    /// Seed the form from an existing bug for editing.
    pub fn from_bug(bug: &Bug) -> Self {
        Self {
            title: bug.title.clone(),
            description: bug.description.clone(),
            project: bug.project.clone().unwrap_or_default(),
            priority: if bug.priority.is_empty() {
                DEFAULT_PRIORITY.to_string()
            } else {
                bug.priority.clone()
            },
        }
    }

    /// Every missing required field, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", MSG_TITLE_REQUIRED));
        }
        if self.description.trim().is_empty() {
            errors.push(FieldError::new("description", MSG_DESCRIPTION_REQUIRED));
        }
        if self.project.is_empty() {
            errors.push(FieldError::new("project", MSG_PROJECT_REQUIRED));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Payload for a new report by `reporter`.
    pub fn into_draft(self, reporter: &str) -> BugDraft {
        BugDraft {
            title: self.title,
            description: self.description,
            status: DEFAULT_STATUS.to_string(),
            priority: self.priority,
            reporter: reporter.to_string(),
            assignee: None,
            steps_to_reproduce: None,
            environment: None,
            project: Some(self.project),
        }
    }

    /// Payload for editing `bug`: the form's fields over the stored record.
    pub fn apply_to(self, bug: &Bug) -> BugDraft {
        BugDraft {
            title: self.title,
            description: self.description,
            priority: self.priority,
            project: Some(self.project).filter(|p| !p.is_empty()),
            ..BugDraft::from(bug)
        }
    }
}
