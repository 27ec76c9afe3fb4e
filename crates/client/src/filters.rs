//! List filters shared by the service (query string) and the list view
//! (local matching).

use serde::{Deserialize, Serialize};

use crate::models::Bug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugFilters {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl BugFilters {
    /// Query parameters for `GET /bugs`; empty values are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("status", non_empty(&self.status)),
            ("priority", non_empty(&self.priority)),
            ("search", non_empty(&self.search)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.to_query().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Exact match on status and priority; case-insensitive substring
    /// search over title and description.
    pub fn matches(&self, bug: &Bug) -> bool {
        if non_empty(&self.status).is_some_and(|s| s != bug.status) {
            return false;
        }
        if non_empty(&self.priority).is_some_and(|p| p != bug.priority) {
            return false;
        }
        match non_empty(&self.search) {
            Some(term) => {
                let term = term.to_lowercase();
                bug.title.to_lowercase().contains(&term)
                    || bug.description.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}
