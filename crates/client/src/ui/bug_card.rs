use colored::{ColoredString, Colorize};

use super::truncate;
use crate::models::Bug;

const EXCERPT_CHARS: usize = 120;

/// Unknown priorities are shown like `medium`.
pub fn priority_badge(priority: &str) -> ColoredString {
    match priority {
        "low" => priority.green(),
        "high" => priority.truecolor(255, 165, 0),
        "critical" => priority.red().bold(),
        _ => priority.yellow(),
    }
}

/// Unknown statuses are shown like `open`.
pub fn status_badge(status: &str) -> ColoredString {
    match status {
        "in-progress" => status.purple(),
        "resolved" => status.green(),
        "closed" => status.dimmed(),
        _ => status.blue(),
    }
}

pub fn render_card(bug: &Bug) -> String {
    let mut out = format!(
        "{} {}  [{}] [{}]\n",
        format!("#{}", bug.id).dimmed(),
        bug.title.bold(),
        priority_badge(&bug.priority),
        status_badge(&bug.status),
    );
    out.push_str(&format!("  {}\n", truncate(&bug.description, EXCERPT_CHARS)));

    let assignee = if bug.assignee.is_empty() {
        "Unassigned".dimmed()
    } else {
        bug.assignee.as_str().green()
    };
    out.push_str(&format!(
        "  {} {}  {} {}\n",
        "Reported by:".dimmed(),
        bug.reporter,
        "Assignee:".dimmed(),
        assignee,
    ));
    out
}

/// Full record, for `show`.
pub fn render_detail(bug: &Bug) -> String {
    let mut out = render_card(bug);

    if !bug.steps_to_reproduce.is_empty() {
        out.push_str(&format!("  {}\n", "Steps to reproduce:".bold()));
        for (i, step) in bug.steps_to_reproduce.iter().enumerate() {
            out.push_str(&format!("    {}. {step}\n", i + 1));
        }
    }

    if let Some(env) = bug.environment.as_ref().filter(|env| !env.is_empty()) {
        let parts: Vec<String> = [("OS", &env.os), ("Browser", &env.browser), ("Version", &env.version)]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
            .collect();
        out.push_str(&format!("  {} {}\n", "Environment:".bold(), parts.join(", ")));
    }

    out.push_str(&format!(
        "  {} {}  {} {}\n",
        "Created:".dimmed(),
        bug.created_at.format("%Y-%m-%d %H:%M"),
        "Updated:".dimmed(),
        bug.updated_at.format("%Y-%m-%d %H:%M"),
    ));
    out
}
