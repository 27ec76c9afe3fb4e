//! Project board over a fixed set of sample projects. Nothing here talks
//! to the server.

use chrono::{NaiveDate, Utc};
use colored::{ColoredString, Colorize};

use super::truncate;

pub const DEFAULT_PROJECT_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub bug_count: u32,
    pub critical_bugs: u32,
    pub team_members: u32,
    pub created_at: NaiveDate,
    pub last_activity: NaiveDate,
}

/// Input for [`ProjectBoard::create`].
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: String,
}

impl NewProject {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            status: DEFAULT_PROJECT_STATUS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectBoard {
    projects: Vec<Project>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn sample(
    id: u32,
    name: &str,
    description: &str,
    status: &str,
    counts: (u32, u32, u32),
    created_at: NaiveDate,
    last_activity: NaiveDate,
) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        bug_count: counts.0,
        critical_bugs: counts.1,
        team_members: counts.2,
        created_at,
        last_activity,
    }
}

impl ProjectBoard {
    /// The four sample projects.
    pub fn with_mock_data() -> Self {
        Self {
            projects: vec![
                sample(
                    1,
                    "Website Redesign",
                    "Complete overhaul of company website with modern design",
                    "active",
                    (12, 2, 5),
                    date(2024, 1, 15),
                    date(2024, 3, 20),
                ),
                sample(
                    2,
                    "Mobile App",
                    "New cross-platform mobile application development",
                    "active",
                    (8, 1, 8),
                    date(2024, 2, 1),
                    date(2024, 3, 18),
                ),
                sample(
                    3,
                    "API Integration",
                    "Third-party API integration and backend services",
                    "completed",
                    (3, 0, 4),
                    date(2023, 11, 10),
                    date(2024, 2, 28),
                ),
                sample(
                    4,
                    "E-commerce Platform",
                    "Online shopping platform with payment processing",
                    "on-hold",
                    (15, 4, 6),
                    date(2024, 1, 30),
                    date(2024, 3, 15),
                ),
            ],
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Append a project. The id is one past the current count, so it can
    /// repeat an id freed by [`delete`](Self::delete).
    pub fn create(&mut self, new: NewProject) -> &Project {
        let today = Utc::now().date_naive();
        let id = u32::try_from(self.projects.len()).unwrap_or(u32::MAX - 1) + 1;
        self.projects.push(Project {
            id,
            name: new.name,
            description: new.description,
            status: new.status,
            bug_count: 0,
            critical_bugs: 0,
            team_members: 1,
            created_at: today,
            last_activity: today,
        });
        &self.projects[self.projects.len() - 1]
    }

    /// Remove every project with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}\n",
            "Projects".bold(),
            "Manage and track bugs across all your projects".dimmed()
        );
        for project in &self.projects {
            out.push('\n');
            out.push_str(&render_project(project));
        }
        out
    }
}

pub fn project_status_badge(status: &str) -> ColoredString {
    match status {
        "active" => status.green(),
        "completed" => status.blue(),
        "on-hold" => status.yellow(),
        _ => status.dimmed(),
    }
}

/// Colour for a critical-bug count: none, a few, several, many.
pub fn critical_count_badge(count: u32) -> ColoredString {
    let text = count.to_string();
    match count {
        0 => text.as_str().dimmed(),
        1..=2 => text.as_str().green(),
        3..=5 => text.as_str().yellow(),
        _ => text.as_str().red(),
    }
}

fn render_project(project: &Project) -> String {
    format!(
        "{} {}  [{}]\n  {}\n  Total Bugs: {}  Critical: {}  Team: {}\n  {} {}  {} {}\n",
        format!("#{}", project.id).dimmed(),
        project.name.bold(),
        project_status_badge(&project.status),
        truncate(&project.description, 100),
        project.bug_count,
        critical_count_badge(project.critical_bugs),
        project.team_members,
        "Created:".dimmed(),
        project.created_at.format("%Y-%m-%d"),
        "Updated:".dimmed(),
        project.last_activity.format("%Y-%m-%d"),
    )
}
