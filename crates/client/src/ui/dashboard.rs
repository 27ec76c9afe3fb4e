//! Summary view over the loaded bug list.

use bugtrack_core::bug::{
    PRIORITY_CRITICAL, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_MEDIUM, STATUS_CLOSED, STATUS_OPEN,
    STATUS_REOPENED, STATUS_RESOLVED,
};
use colored::Colorize;

use super::bug_card::{priority_badge, status_badge};
use super::truncate;
use crate::models::{Bug, User};

const RECENT_LIMIT: usize = 5;
const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    /// `open` or `reopened`.
    pub open: usize,
    /// `closed` or `resolved`.
    pub closed: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl DashboardStats {
    pub fn from_bugs(bugs: &[Bug]) -> Self {
        let with_status = |statuses: &[&str]| {
            bugs.iter()
                .filter(|b| statuses.contains(&b.status.as_str()))
                .count()
        };
        let with_priority = |priority: &str| bugs.iter().filter(|b| b.priority == priority).count();

        Self {
            total: bugs.len(),
            open: with_status(&[STATUS_OPEN, STATUS_REOPENED]),
            closed: with_status(&[STATUS_CLOSED, STATUS_RESOLVED]),
            critical: with_priority(PRIORITY_CRITICAL),
            high: with_priority(PRIORITY_HIGH),
            medium: with_priority(PRIORITY_MEDIUM),
            low: with_priority(PRIORITY_LOW),
        }
    }
}

/// The most recently created bugs, newest first.
pub fn recent_bugs(bugs: &[Bug]) -> Vec<&Bug> {
    let mut sorted: Vec<&Bug> = bugs.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(RECENT_LIMIT);
    sorted
}

/// Bugs whose assignee names `user`, by display name or email.
pub fn assigned_to<'a>(bugs: &'a [Bug], user: &User) -> Vec<&'a Bug> {
    let names = [user.display_name(), user.email.as_str()];
    bugs.iter()
        .filter(|bug| {
            !bug.assignee.is_empty() && names.iter().any(|n| bug.assignee.eq_ignore_ascii_case(n))
        })
        .collect()
}

/// A bar `width` cells wide, filled in proportion to `count / total`.
pub fn priority_bar(count: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (count * width + total / 2) / total
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

fn render_row(bug: &Bug, trailer: &str) -> String {
    format!(
        "  [{}] {}  {}  {}\n",
        priority_badge(&bug.priority),
        truncate(&bug.title, 50),
        status_badge(&bug.status),
        trailer.dimmed(),
    )
}

pub fn render_dashboard(bugs: &[Bug], user: Option<&User>) -> String {
    let stats = DashboardStats::from_bugs(bugs);
    let mut out = format!("{}\n", "Dashboard".bold());
    if let Some(user) = user {
        out.push_str(&format!("Welcome back, {}!\n", user.display_name()));
    }

    out.push_str(&format!(
        "\n  Total Bugs: {}   Open Bugs: {}   Closed Bugs: {}   Critical Priority: {}\n",
        stats.total.to_string().bold(),
        stats.open.to_string().red(),
        stats.closed.to_string().green(),
        stats.critical.to_string().red().bold(),
    ));

    if let Some(user) = user {
        let mine = assigned_to(bugs, user);
        out.push_str(&format!("\n{} ({})\n", "My Assigned Bugs".bold(), mine.len()));
        if mine.is_empty() {
            out.push_str(&format!("  {}\n", "No bugs assigned to you".dimmed()));
        }
        for bug in mine.iter().take(RECENT_LIMIT) {
            out.push_str(&render_row(bug, &bug.created_at.format("%Y-%m-%d").to_string()));
        }
    }

    out.push_str(&format!("\n{}\n", "Recent Bugs".bold()));
    let recent = recent_bugs(bugs);
    if recent.is_empty() {
        out.push_str(&format!("  {}\n", "No bugs reported yet".dimmed()));
    }
    for bug in recent {
        let trailer = format!("By {}  {}", bug.reporter, bug.created_at.format("%Y-%m-%d"));
        out.push_str(&render_row(bug, &trailer));
    }

    out.push_str(&format!("\n{}\n", "Priority Distribution".bold()));
    for (name, count) in [
        (PRIORITY_CRITICAL, stats.critical),
        (PRIORITY_HIGH, stats.high),
        (PRIORITY_MEDIUM, stats.medium),
        (PRIORITY_LOW, stats.low),
    ] {
        out.push_str(&format!(
            "  {:<9} {} {count:>4}\n",
            name,
            colored_bar(name, count, stats.total),
        ));
    }
    out
}

fn colored_bar(priority: &str, count: usize, total: usize) -> String {
    let bar = priority_bar(count, total, BAR_WIDTH);
    let bar = bar.as_str();
    match priority {
        PRIORITY_CRITICAL => bar.red().to_string(),
        PRIORITY_HIGH => bar.truecolor(255, 165, 0).to_string(),
        PRIORITY_MEDIUM => bar.yellow().to_string(),
        _ => bar.green().to_string(),
    }
}
