use colored::Colorize;

use crate::filters::BugFilters;

/// One line describing the active filters, or `None` when nothing is set.
pub fn render_summary(filters: &BugFilters) -> Option<String> {
    if !filters.has_active_filters() {
        return None;
    }

    let parts: Vec<String> = filters
        .to_query()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key.dimmed(), value.cyan()))
        .collect();
    Some(format!("{} {}", "Filters:".bold(), parts.join("  ")))
}
