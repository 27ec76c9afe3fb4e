use colored::Colorize;

use super::bug_card::render_card;
use super::bug_filters::render_summary;
use crate::filters::BugFilters;
use crate::models::Bug;

pub const EMPTY_MESSAGE: &str = "No bugs found";
pub const EMPTY_HINT: &str = "Get started by creating a new bug report.";

/// The bugs that pass `filters`, in list order.
pub fn visible_bugs<'a>(bugs: &'a [Bug], filters: &BugFilters) -> Vec<&'a Bug> {
    bugs.iter().filter(|bug| filters.matches(bug)).collect()
}

pub fn render_list(bugs: &[Bug], filters: &BugFilters, loading: bool) -> String {
    if loading {
        return format!("{}\n", "Loading bugs...".dimmed());
    }

    let mut out = String::new();
    if let Some(summary) = render_summary(filters) {
        out.push_str(&summary);
        out.push('\n');
    }

    let visible = visible_bugs(bugs, filters);
    if visible.is_empty() {
        out.push_str(&format!("{}\n{}\n", EMPTY_MESSAGE.bold(), EMPTY_HINT.dimmed()));
        return out;
    }

    for bug in &visible {
        out.push('\n');
        out.push_str(&render_card(bug));
    }
    out.push_str(&format!("\n{}\n", format!("{} bug(s)", visible.len()).dimmed()));
    out
}
