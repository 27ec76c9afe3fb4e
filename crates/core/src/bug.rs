//! Bug record constants and the validation chain.
//!
//! Defines the status and priority sets, the field length limits, and the
//! ordered field checks applied to every create and update before anything
//! reaches the store.

use serde::{Deserialize, Serialize};
use validator::ValidateLength;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly reported bug.
pub const STATUS_OPEN: &str = "open";
/// Somebody is working on the bug.
pub const STATUS_IN_PROGRESS: &str = "in-progress";
/// The underlying defect has been fixed.
pub const STATUS_RESOLVED: &str = "resolved";

/// Statuses accepted by the server validator.
pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_RESOLVED];

/// Shown by client views but rejected by the server validator.
pub const STATUS_CLOSED: &str = "closed";
/// Counted as open by the dashboard; rejected by the server validator.
pub const STATUS_REOPENED: &str = "reopened";

/// Statuses the client offers in pickers and filters. Superset of
/// [`VALID_STATUSES`]; `closed` never passes server validation.
pub const CLIENT_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

pub const DEFAULT_STATUS: &str = STATUS_OPEN;

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_CRITICAL: &str = "critical";

/// All valid priorities, lowest first.
pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_CRITICAL,
];

pub const DEFAULT_PRIORITY: &str = PRIORITY_MEDIUM;

// ---------------------------------------------------------------------------
// Length limits (characters, measured after trimming)
// ---------------------------------------------------------------------------

pub const TITLE_MIN_LENGTH: u64 = 3;
pub const TITLE_MAX_LENGTH: u64 = 100;
pub const DESCRIPTION_MIN_LENGTH: u64 = 10;
pub const REPORTER_MIN_LENGTH: u64 = 2;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_REPORTER: &str = "reporter";

pub const MSG_TITLE: &str = "Title must be between 3 and 100 characters";
pub const MSG_DESCRIPTION: &str = "Description must be at least 10 characters";
pub const MSG_STATUS: &str = "Invalid status";
pub const MSG_PRIORITY: &str = "Invalid priority";
pub const MSG_REPORTER: &str = "Reporter name must be at least 2 characters";

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation chain
// ---------------------------------------------------------------------------

/// The five checked fields of an incoming bug payload. `None` means the
/// field was absent from the request and is treated as an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct BugCandidate<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub reporter: Option<&'a str>,
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or("")
}

/// Run the full validation chain.
///
/// Checks run in a fixed order (title, description, status, priority,
/// reporter) and never stop early, so the returned list holds exactly one
/// entry per violated field.
pub fn validate_bug(candidate: &BugCandidate<'_>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !trimmed(candidate.title).validate_length(
        Some(TITLE_MIN_LENGTH),
        Some(TITLE_MAX_LENGTH),
        None,
    ) {
        errors.push(FieldError::new(FIELD_TITLE, MSG_TITLE));
    }

    if !trimmed(candidate.description).validate_length(Some(DESCRIPTION_MIN_LENGTH), None, None) {
        errors.push(FieldError::new(FIELD_DESCRIPTION, MSG_DESCRIPTION));
    }

    if !candidate.status.is_some_and(is_valid_status) {
        errors.push(FieldError::new(FIELD_STATUS, MSG_STATUS));
    }

    if !candidate.priority.is_some_and(is_valid_priority) {
        errors.push(FieldError::new(FIELD_PRIORITY, MSG_PRIORITY));
    }

    if !trimmed(candidate.reporter).validate_length(Some(REPORTER_MIN_LENGTH), None, None) {
        errors.push(FieldError::new(FIELD_REPORTER, MSG_REPORTER));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// [`validate_bug`] lifted into [`CoreError::InvalidFields`].
pub fn ensure_valid(candidate: &BugCandidate<'_>) -> Result<(), CoreError> {
    validate_bug(candidate).map_err(CoreError::InvalidFields)
}

pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

pub fn is_valid_priority(priority: &str) -> bool {
    VALID_PRIORITIES.contains(&priority)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
